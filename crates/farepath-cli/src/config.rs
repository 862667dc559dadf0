//! Per-invocation settings shared by every subcommand.

use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};
use farepath_lib::Network;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Resolved global options: the location network and the generator seed.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Seed for graph synthesis; printed so a run can be reproduced.
    pub seed: u64,
    pub network: Cow<'static, Network>,
}

impl RunConfig {
    /// Load the network file when given, otherwise use the built-in airports.
    ///
    /// Without an explicit seed a random one is drawn and logged.
    pub fn load(seed: Option<u64>, network_path: Option<&Path>) -> Result<Self> {
        let network = match network_path {
            Some(path) => Cow::Owned(
                Network::from_path(path)
                    .with_context(|| format!("failed to load network from {}", path.display()))?,
            ),
            None => Cow::Borrowed(Network::builtin()),
        };

        let seed = match seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                info!(seed, "no seed given; drew a random one");
                seed
            }
        };

        Ok(Self { seed, network })
    }

    /// A fresh generator for this run's seed.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Write;

    #[test]
    fn same_seed_same_stream() {
        let config = RunConfig::load(Some(9), None).unwrap();
        let first: u64 = config.rng().gen();
        let second: u64 = config.rng().gen();
        assert_eq!(first, second);
        assert_eq!(config.network.len(), 20);
    }

    #[test]
    fn network_file_overrides_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[{{"id": 0, "name": "Alpha", "latitude": 0.0, "longitude": 0.0}},
               {{"id": 1, "name": "Beta", "latitude": 1.0, "longitude": 1.0}}]"#
        )
        .unwrap();
        let config = RunConfig::load(Some(1), Some(file.path())).unwrap();
        assert_eq!(config.network.len(), 2);
        assert_eq!(config.network.name(1), Some("Beta"));
    }

    #[test]
    fn missing_network_file_is_reported() {
        let error = RunConfig::load(Some(1), Some(Path::new("/nonexistent/net.json"))).unwrap_err();
        assert!(format!("{error:#}").contains("failed to load network"));
    }
}
