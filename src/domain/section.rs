#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// Ordered title -> body mapping. Inserting an existing title replaces its body
/// and keeps the position of the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections(Vec<Section>);

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: String, body: String) {
        match self.0.iter_mut().find(|s| s.title == title) {
            Some(existing) => existing.body = body,
            None => self.0.push(Section { title, body }),
        }
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.body.as_str())
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.title.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
