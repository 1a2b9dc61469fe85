// Two handler tiers: public (no authentication) and protected (the
// `AuthUser` extractor rejects requests without a valid `x-auth-token`).
pub mod protected;
pub mod public;
