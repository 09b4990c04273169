pub mod columns;
pub mod compass;
