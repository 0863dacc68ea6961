// -----------------------------------------------------------------------------
// Modules

mod from_dynamic;
mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use from_dynamic::FromDynamic;
pub use reflect::Reflect;
