//! Request validation, generation pipeline and font loading.

pub mod font;
pub mod qr_generate;
pub mod qr_request;
