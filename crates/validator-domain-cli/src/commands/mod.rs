pub mod encode;
pub mod normalize;
pub mod signing_form;
pub mod verify;
