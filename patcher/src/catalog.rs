use crate::{PatcherError, PatcherResult};
use data_types::patch::PatchSet;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// All patch sets known for one image, stored as a JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub sets: Vec<PatchSet>,
}

impl Catalog {
    pub fn from_file<A: AsRef<Path>>(path: A) -> io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let catalog = serde_json::from_reader(reader)?;
        Ok(catalog)
    }

    pub fn save<A: AsRef<Path>>(&self, path: A) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PatchSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    /// The sets named in `names`, in that order. No names selects every set.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> PatcherResult<Vec<&PatchSet>> {
        if names.is_empty() {
            return Ok(self.sets.iter().collect());
        }
        names
            .iter()
            .map(|name| {
                self.get(name.as_ref())
                    .ok_or_else(|| PatcherError::UnknownSet(name.as_ref().to_string()))
            })
            .collect()
    }
}
