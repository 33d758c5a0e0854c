pub(crate) mod auth;
pub(crate) mod cors;
pub(crate) mod guards;
pub(crate) mod trace;
