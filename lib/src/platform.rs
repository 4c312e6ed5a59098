//! Platform specific cpu numbering and accelerator detection.
use crate::error::{ConvertError, Result};
use crate::solution::Island;

/// Cores of the LITTLE cluster on odroid boards; BIG cores start after them.
const ODROID_LITTLE_CORES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Odroid,
    Zcu102,
    XavierAgx,
}

impl Platform {
    /// Identify the platform by substring of its name, e.g. `odroid-xu4`.
    pub fn from_name(platform_name: &str) -> Result<Self> {
        if platform_name.contains("odroid") {
            Ok(Platform::Odroid)
        } else if platform_name.contains("zcu102") {
            Ok(Platform::Zcu102)
        } else if platform_name.contains("xavier-agx") {
            Ok(Platform::XavierAgx)
        } else {
            Err(ConvertError::UnknownPlatform(platform_name.to_owned()))
        }
    }

    pub fn is_accelerator(&self, island: &Island) -> bool {
        match self {
            Platform::Odroid | Platform::Zcu102 => island.capacity > 1.0,
            Platform::XavierAgx => island.pus.len() == 1,
        }
    }

    /// Global index of a pu. Accelerator pus are numbered on their own from 0.
    pub fn get_cpu(&self, island: &Island, pu_id: usize) -> usize {
        if self.is_accelerator(island) {
            return pu_id;
        }
        match self {
            Platform::Odroid if island.capacity >= 1.0 => ODROID_LITTLE_CORES + pu_id,
            Platform::Odroid | Platform::Zcu102 | Platform::XavierAgx => pu_id,
        }
    }
}
