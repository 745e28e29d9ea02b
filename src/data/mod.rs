//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models so the
//! service layer never touches entity types.

pub mod voice_config;

#[cfg(test)]
mod test;
