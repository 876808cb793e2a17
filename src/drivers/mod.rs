//! Board drivers and one-shot hardware initialisation.

pub mod adc;
pub mod hw_init;
pub mod indicator;

