//! Sound timer tone output.
//!
//! The machine only exposes whether the sound timer is running. A [`Tone`](speaker::Tone)
//! watches that flag and starts or stops a [`Speaker`](speaker::Speaker) on each edge:
//!
//! - **Beeper**: continuous sine wave through rodio, paused while silent.
//! - **Silent**: does nothing; used for `--mute`, headless hosts and tests.

pub mod speaker;
