//! SeaORM adapters. Functions are generic over `ConnectionTrait` and return
//! `DbErr`; the repository layer maps errors to `DomainError`.

pub mod sessions_sea;
