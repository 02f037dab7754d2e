pub(crate) mod cancel;
pub(crate) mod controller;
pub(crate) mod frame;
pub(crate) mod state;
