pub use image::{GenericImage, GenericImageView, RgbImage};
pub use parking_lot::Mutex;
pub use rayon::prelude::*;

pub type AnyError = anyhow::Error;

pub use std::{
	path::{Path, PathBuf},
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
	time::Instant,
};

pub use core::time::Duration;

pub use rayon;
pub use image;
pub use imageproc;
pub use parking_lot;
pub use anyhow;
pub use log;

mod geometry;
pub use geometry::*;

#[path = "image.rs"]
mod util_image;
pub use util_image::*;
