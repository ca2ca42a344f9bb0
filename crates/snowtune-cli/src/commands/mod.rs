pub(crate) mod analysis;
pub(crate) mod helpers;
pub(crate) mod params;
