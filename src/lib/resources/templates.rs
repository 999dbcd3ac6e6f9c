//! Module handling the registry of meme templates.

use std::collections::HashMap;
use std::fs::File;
use std::hash::BuildHasher;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde_json;
use thiserror::Error;

use crate::model::Template;


/// Read-only repository of meme templates.
pub trait TemplateRegistry: Send + Sync {
    /// Look up a template by its ID.
    fn get(&self, id: &str) -> Option<&Template>;

    /// All the templates in the registry.
    fn templates(&self) -> Vec<&Template>;
}


/// Template registry backed by an in-memory list,
/// typically loaded from a JSON file.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    templates: Vec<Template>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Create a registry from given templates.
    /// If IDs are duplicated, the first template with given ID wins.
    pub fn new<I: IntoIterator<Item=Template>>(templates: I) -> Self {
        let mut result = Registry::default();
        for template in templates {
            if result.index.contains_key(&template.id) {
                warn!("Duplicate template ID `{}` in the registry, ignoring", template.id);
                continue;
            }
            result.index.insert(template.id.clone(), result.templates.len());
            result.templates.push(template);
        }
        debug!("Template registry created with {} template(s)", result.templates.len());
        result
    }

    /// Load the registry from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        debug!("Loading template registry from {}", path.display());
        let file = File::open(path)?;
        Registry::from_reader(BufReader::new(file))
    }

    /// Load the registry from JSON text.
    ///
    /// The JSON is either an array of templates,
    /// or an envelope of the form `{"data": {"memes": [...]}}`.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let root: RegistryJson = serde_json::from_str(json)?;
        Ok(Registry::new(root.into_templates()))
    }

    /// Load the registry from a reader of JSON text.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let root: RegistryJson = serde_json::from_reader(reader)?;
        Ok(Registry::new(root.into_templates()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateRegistry for Registry {
    fn get(&self, id: &str) -> Option<&Template> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    fn templates(&self) -> Vec<&Template> {
        self.templates.iter().collect()
    }
}

impl<S: BuildHasher + Send + Sync> TemplateRegistry for HashMap<String, Template, S> {
    fn get(&self, id: &str) -> Option<&Template> {
        HashMap::get(self, id)
    }

    fn templates(&self) -> Vec<&Template> {
        let mut result: Vec<_> = self.values().collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        result
    }
}


/// Shapes of the JSON that the registry can be loaded from.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegistryJson {
    List(Vec<Template>),
    Envelope { data: Memes },
}

#[derive(Deserialize)]
struct Memes {
    memes: Vec<Template>,
}

impl RegistryJson {
    fn into_templates(self) -> Vec<Template> {
        match self {
            RegistryJson::List(templates) => templates,
            RegistryJson::Envelope{data} => data.memes,
        }
    }
}


/// Error that may occur while loading the template registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cannot read template registry: {0}")]
    Io(#[from] io::Error),
    #[error("malformed template registry: {0}")]
    Json(#[from] serde_json::Error),
}
