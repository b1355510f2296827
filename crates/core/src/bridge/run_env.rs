use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Host environment the settings layer is running in.
///
/// Only [`RunEnv::Desktop`] can reach the host commands; everything else is
/// served by a gated bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunEnv {
    Desktop,
    #[default]
    Web,
}

impl RunEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunEnv::Desktop => "desktop",
            RunEnv::Web => "web",
        }
    }

    pub fn is_desktop(&self) -> bool {
        matches!(self, RunEnv::Desktop)
    }
}

impl fmt::Display for RunEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunEnv {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to `Web`, the environment without host commands.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "desktop" | "tauri" => RunEnv::Desktop,
            _ => RunEnv::Web,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_env() {
        assert_eq!("desktop".parse::<RunEnv>().unwrap(), RunEnv::Desktop);
        assert_eq!(" Desktop ".parse::<RunEnv>().unwrap(), RunEnv::Desktop);
        assert_eq!("tauri".parse::<RunEnv>().unwrap(), RunEnv::Desktop);
        assert_eq!("web".parse::<RunEnv>().unwrap(), RunEnv::Web);
        assert_eq!("mobile".parse::<RunEnv>().unwrap(), RunEnv::Web);
        assert_eq!("".parse::<RunEnv>().unwrap(), RunEnv::Web);
    }
}
