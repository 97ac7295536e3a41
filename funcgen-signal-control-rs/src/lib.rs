//! Core control logic for the funcgen programmable signal generator.
//!
//! Hardware-independent: everything in this crate is pure state-machine and
//! arithmetic code, unit-tested on the host. The firmware crate wires it to
//! the keypad, push-button, and DAC.

#![no_std]

pub mod signal_control;
