pub mod completion;
pub mod database;
pub mod entities;
pub mod repositories;
pub mod supabase;
pub mod traits;
