use async_trait::async_trait;
use burn::data::dataset::{self, Dataset as _, InMemDataset};
use derive_new::new;
use log::{info, warn};
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use serde::{Deserialize, Serialize};

use super::{CorpusError, LoadableCorpus};
use crate::pipelines::decision_list::{Example, Examples, Instance, SenseCounts, SenseLabels};

/// The name of the Senseval corpus format
pub static DATASET: &str = "senseval";

/// One `<instance>` of a lexical sample corpus
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, new)]
pub struct Item {
    /// The instance identifier
    pub id: String,

    /// The `senseid` of every `<answer>`, in document order
    pub senses: Vec<String>,

    /// The text of every `<s>`; `None` when it has no single text node
    pub sentences: Vec<Option<String>>,
}

/// Struct for a Senseval lexical sample corpus
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for the Senseval corpus
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

#[async_trait]
impl LoadableCorpus<Item> for Dataset {
    async fn load(path: &str) -> Result<Self, CorpusError> {
        info!("Loading {} corpus from {}", DATASET, path);
        let xml = tokio::fs::read_to_string(path).await?;

        Self::from_xml(&xml)
    }
}

/// Content of an `<s>` element
enum Node {
    Text(String),
    Element(Vec<Node>),
}

/// The text of an element whose content is exactly one text node, looking through
/// single-child wrappers such as `<s><head>line</head></s>`
fn single_text(children: &[Node]) -> Option<String> {
    match children {
        [Node::Text(text)] => Some(text.clone()),
        [Node::Element(inner)] => single_text(inner),
        _ => None,
    }
}

fn push_text(open: &mut [Vec<Node>], text: &str) {
    if let Some(children) = open.last_mut() {
        match children.last_mut() {
            Some(Node::Text(previous)) => previous.push_str(text),
            _ => children.push(Node::Text(text.to_string())),
        }
    }
}

fn attribute(element: &BytesStart<'_>, name: &'static str) -> Result<String, CorpusError> {
    let attr = element
        .try_get_attribute(name)?
        .ok_or_else(|| CorpusError::MissingAttribute {
            element: String::from_utf8_lossy(element.local_name().as_ref()).into_owned(),
            attribute: name,
        })?;

    Ok(attr.unescape_value()?.into_owned())
}

fn open_instance(element: &BytesStart<'_>, current: &Option<Item>) -> Result<Item, CorpusError> {
    let id = attribute(element, "id")?;

    if current.is_some() {
        return Err(CorpusError::NestedInstance(id));
    }

    Ok(Item::new(id, Vec::new(), Vec::new()))
}

fn add_answer(element: &BytesStart<'_>, current: &mut Option<Item>) -> Result<(), CorpusError> {
    if let Some(item) = current.as_mut() {
        item.senses.push(attribute(element, "senseid")?);
    }

    Ok(())
}

impl Dataset {
    /// Wrap already-parsed items
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            dataset: InMemDataset::new(items),
        }
    }

    /// Parse a corpus of `<instance>` elements with `<answer senseid>` and `<s>` children
    pub fn from_xml(xml: &str) -> Result<Self, CorpusError> {
        let mut reader = Reader::from_str(xml);
        let mut items = Vec::new();
        let mut current: Option<Item> = None;
        // Child lists of the open elements inside the current <s>, outermost first
        let mut open: Vec<Vec<Node>> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(_) if !open.is_empty() => open.push(Vec::new()),
                Event::Empty(_) if !open.is_empty() => {
                    if let Some(children) = open.last_mut() {
                        children.push(Node::Element(Vec::new()));
                    }
                }
                Event::End(_) if !open.is_empty() => {
                    let children = open.pop().unwrap_or_default();

                    match open.last_mut() {
                        Some(parent) => parent.push(Node::Element(children)),
                        None => {
                            if let Some(item) = current.as_mut() {
                                item.sentences.push(single_text(&children));
                            }
                        }
                    }
                }
                Event::Text(text) if !open.is_empty() => push_text(&mut open, &text.unescape()?),
                Event::CData(data) if !open.is_empty() => {
                    push_text(&mut open, &String::from_utf8_lossy(&data))
                }
                Event::Start(element) => match element.local_name().as_ref() {
                    b"instance" => current = Some(open_instance(&element, &current)?),
                    b"answer" => add_answer(&element, &mut current)?,
                    b"s" if current.is_some() => open.push(Vec::new()),
                    _ => {}
                },
                Event::Empty(element) => match element.local_name().as_ref() {
                    b"instance" => items.push(open_instance(&element, &current)?),
                    b"answer" => add_answer(&element, &mut current)?,
                    b"s" => {
                        if let Some(item) = current.as_mut() {
                            item.sentences.push(None);
                        }
                    }
                    _ => {}
                },
                Event::End(element) if element.local_name().as_ref() == b"instance" => {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(item) = current {
            return Err(CorpusError::Unterminated(item.id));
        }

        Ok(Self::from_items(items))
    }

    /// Training examples, labelled by each instance's first answer
    pub fn examples(&self, labels: &SenseLabels) -> Result<Examples, CorpusError> {
        let mut examples = Examples::default();

        for item in self.dataset.iter() {
            let Some(label) = item.senses.first() else {
                return Err(CorpusError::MissingAnswer(item.id));
            };

            let sense = labels
                .sense_of(label)
                .ok_or_else(|| CorpusError::UnknownSense {
                    instance: item.id.clone(),
                    label: label.clone(),
                })?;

            if item.sentences.iter().all(Option::is_none) {
                warn!("Instance {} has no usable sentence text", item.id);
            }

            for text in item.sentences {
                examples.push(Example::new(text, sense));
            }
        }

        Ok(examples)
    }

    /// Tallies of every answer in the corpus
    pub fn sense_counts(&self, labels: &SenseLabels) -> Result<SenseCounts, CorpusError> {
        let mut counts = SenseCounts::default();

        for item in self.dataset.iter() {
            for label in &item.senses {
                let sense = labels
                    .sense_of(label)
                    .ok_or_else(|| CorpusError::UnknownSense {
                        instance: item.id.clone(),
                        label: label.clone(),
                    })?;

                counts.add(sense);
            }
        }

        Ok(counts)
    }

    /// Test instances in corpus order; answers are ignored
    pub fn instances(&self) -> Vec<Instance> {
        self.dataset
            .iter()
            .map(|item| Instance::new(item.id, item.sentences))
            .collect()
    }
}
