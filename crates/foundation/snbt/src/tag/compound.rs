use std::ops::Index;

use indexmap::{IndexMap, map::Entry};

use crate::{
    access::{AccessError, Location},
    error::TagError,
    settings::SnbtWriteOptions,
    snbt::{self, SnbtError},
};

use super::{CompoundWithOptions, SnbtString, SnbtTag};


/// The map type backing [`SnbtCompound`], which keeps entries in insertion order.
/// Its keys are [`SnbtString`] keys, and can be looked up with a `&str`.
pub type Map<T> = IndexMap<SnbtString, T>;

/// An SNBT compound: a map of unique string keys to tag values, in insertion order.
///
/// Equality does not depend on the order of entries, so a compound written with sorted keys
/// compares equal to the compound it was written from once read back.
#[repr(transparent)]
#[derive(Clone, PartialEq, Default)]
pub struct SnbtCompound(Map<SnbtTag>);

impl SnbtCompound {
    /// Returns a new, empty compound.
    #[inline]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns a new, empty compound with the given initial capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Map::with_capacity(capacity))
    }

    /// Returns a reference to the internal map of this compound.
    #[inline]
    pub fn inner(&self) -> &Map<SnbtTag> {
        &self.0
    }

    /// Returns the internal map of this compound.
    #[inline]
    pub fn into_inner(self) -> Map<SnbtTag> {
        self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds a new entry at the end of the compound, or returns
    /// [`TagError::DuplicateKey`] without modifying the compound if `key` is already present.
    pub fn add<K, T>(&mut self, key: K, value: T) -> Result<(), TagError>
    where
        K: Into<String>,
        T: Into<SnbtTag>,
    {
        match self.0.entry(SnbtString::key(key)) {
            Entry::Occupied(entry) => Err(TagError::duplicate_key(entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(value.into());
                Ok(())
            }
        }
    }

    /// Sets the value of `key`, returning its previous value. A new key is added at the end of
    /// the compound, while an existing key keeps its position.
    #[inline]
    pub fn insert<K, T>(&mut self, key: K, value: T) -> Option<SnbtTag>
    where
        K: Into<String>,
        T: Into<SnbtTag>,
    {
        self.0.insert(SnbtString::key(key), value.into())
    }

    /// Removes and returns the value of `key`, preserving the order of the remaining entries.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<SnbtTag> {
        self.0.shift_remove(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the value of the tag with the given key, or an error if no tag exists with the
    /// given key or it is not of the requested type. Used to obtain primitives as well as
    /// shared references to strings, arrays, lists, and compounds.
    #[inline]
    pub fn get<'a, T>(&'a self, key: &str) -> Result<T, AccessError>
    where
        T: TryFrom<&'a SnbtTag>,
        T::Error: Into<anyhow::Error>,
    {
        let tag = self.0.get(key).ok_or_else(|| AccessError::missing_key(key))?;
        T::try_from(tag)
            .map_err(|error| AccessError::from_conversion(Location::Key(key.into()), error))
    }

    /// Returns a mutable reference to the value of the tag with the given key, or an error
    /// if no tag exists with the given key or it is not of the requested type.
    #[inline]
    pub fn get_mut<'a, T>(&'a mut self, key: &str) -> Result<T, AccessError>
    where
        T: TryFrom<&'a mut SnbtTag>,
        T::Error: Into<anyhow::Error>,
    {
        let tag = self.0.get_mut(key).ok_or_else(|| AccessError::missing_key(key))?;
        T::try_from(tag)
            .map_err(|error| AccessError::from_conversion(Location::Key(key.into()), error))
    }

    /// Returns a reference to the tag with the given key without any casting.
    #[inline]
    pub fn get_tag(&self, key: &str) -> Option<&SnbtTag> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the tag with the given key without any casting.
    #[inline]
    pub fn get_tag_mut(&mut self, key: &str) -> Option<&mut SnbtTag> {
        self.0.get_mut(key)
    }

    #[inline]
    pub fn iter(&self) -> <&Map<SnbtTag> as IntoIterator>::IntoIter {
        self.into_iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> <&mut Map<SnbtTag> as IntoIterator>::IntoIter {
        self.into_iter()
    }

    #[inline]
    pub fn keys(&self) -> indexmap::map::Keys<'_, SnbtString, SnbtTag> {
        self.0.keys()
    }

    /// Parses a compound from SNBT. See [`snbt::parse`].
    #[inline]
    pub fn from_snbt(input: &str) -> Result<Self, SnbtError> {
        snbt::parse(input)
    }

    /// Converts this compound into SNBT with the default options, which is equivalent
    /// to `compound.to_string()`.
    #[inline]
    pub fn to_snbt(&self) -> String {
        self.to_string()
    }

    /// Converts this compound into SNBT.
    #[inline]
    pub fn to_snbt_with_options(&self, opts: &SnbtWriteOptions) -> String {
        CompoundWithOptions::new(self, opts).to_string()
    }
}

impl IntoIterator for SnbtCompound {
    type IntoIter = <Map<SnbtTag> as IntoIterator>::IntoIter;
    type Item = <Map<SnbtTag> as IntoIterator>::Item;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SnbtCompound {
    type IntoIter = <&'a Map<SnbtTag> as IntoIterator>::IntoIter;
    type Item = <&'a Map<SnbtTag> as IntoIterator>::Item;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut SnbtCompound {
    type IntoIter = <&'a mut Map<SnbtTag> as IntoIterator>::IntoIter;
    type Item = (&'a SnbtString, &'a mut SnbtTag);

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

/// Later entries replace earlier entries with the same key.
impl FromIterator<(String, SnbtTag)> for SnbtCompound {
    #[inline]
    fn from_iter<T: IntoIterator<Item = (String, SnbtTag)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (SnbtString::key(key), value))
                .collect(),
        )
    }
}

impl Extend<(String, SnbtTag)> for SnbtCompound {
    #[inline]
    fn extend<T: IntoIterator<Item = (String, SnbtTag)>>(&mut self, iter: T) {
        self.0.extend(iter.into_iter().map(|(key, value)| (SnbtString::key(key), value)));
    }
}

impl Index<&str> for SnbtCompound {
    type Output = SnbtTag;

    #[inline]
    fn index(&self, key: &str) -> &SnbtTag {
        &self.0[key]
    }
}
