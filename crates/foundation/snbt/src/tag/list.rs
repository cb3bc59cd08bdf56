use std::ops::{Deref, Index};

use crate::{
    access::{AccessError, Location},
    error::TagError,
    settings::SnbtWriteOptions,
};

use super::{ListWithOptions, SnbtTag, TagType};


/// An SNBT list, whose elements all share one tag type.
///
/// The element type is pinned by the first element added, and cleared again once the list
/// becomes empty. Elements are only added or replaced through [`push`](SnbtList::push) and
/// [`set`](SnbtList::set), which both check the element type, so there is no mutable access
/// to the elements themselves.
#[derive(Clone, Default)]
pub struct SnbtList {
    elements:     Vec<SnbtTag>,
    element_type: Option<TagType>,
}

impl SnbtList {
    /// Returns a new, empty list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            elements:     Vec::new(),
            element_type: None,
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements:     Vec::with_capacity(capacity),
            element_type: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The tag type of this list's elements, or `None` if the list is empty.
    #[inline]
    pub fn element_type(&self) -> Option<TagType> {
        self.element_type
    }

    #[inline]
    pub fn as_slice(&self) -> &[SnbtTag] {
        &self.elements
    }

    /// Returns the internal vector of this list.
    #[inline]
    pub fn into_inner(self) -> Vec<SnbtTag> {
        self.elements
    }

    /// Appends a value, or returns [`TagError::InvalidElementType`] without modifying the list
    /// if its type differs from the list's element type.
    pub fn push<T: Into<SnbtTag>>(&mut self, value: T) -> Result<(), TagError> {
        let value = value.into();
        let found = value.tag_type();

        match self.element_type {
            Some(expected) if expected != found => {
                Err(TagError::invalid_element_type(found, expected))
            }
            _ => {
                self.element_type = Some(found);
                self.elements.push(value);
                Ok(())
            }
        }
    }

    /// Returns the value of the tag at the given index, or an error if the index is out of bounds
    /// or the tag is not of the requested type.
    #[inline]
    pub fn get<'a, T>(&'a self, index: usize) -> Result<T, AccessError>
    where
        T: TryFrom<&'a SnbtTag>,
        T::Error: Into<anyhow::Error>,
    {
        let tag = self
            .elements
            .get(index)
            .ok_or_else(|| AccessError::index_out_of_bounds(index, self.len()))?;
        T::try_from(tag).map_err(|error| AccessError::from_conversion(Location::Index(index), error))
    }

    #[inline]
    pub fn get_tag(&self, index: usize) -> Option<&SnbtTag> {
        self.elements.get(index)
    }

    /// Replaces the element at the given index, returning the old element. Fails without
    /// modifying the list if the index is out of bounds, or if the value's type differs from
    /// the list's element type.
    pub fn set<T: Into<SnbtTag>>(&mut self, index: usize, value: T) -> Result<SnbtTag, TagError> {
        let value = value.into();
        let len = self.elements.len();

        let Some(slot) = self.elements.get_mut(index) else {
            return Err(TagError::IndexOutOfBounds { index, len });
        };

        let (found, expected) = (value.tag_type(), slot.tag_type());
        if found != expected {
            return Err(TagError::invalid_element_type(found, expected));
        }

        Ok(std::mem::replace(slot, value))
    }

    /// While preserving the order of the list, removes and returns the tag at the given index,
    /// or returns `None` if the index is out of bounds.
    pub fn remove_tag(&mut self, index: usize) -> Option<SnbtTag> {
        if index >= self.elements.len() {
            return None;
        }

        let removed = self.elements.remove(index);
        if self.elements.is_empty() {
            self.element_type = None;
        }
        Some(removed)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SnbtTag> {
        self.elements.iter()
    }

    /// Checks that every element has the list's element type, reporting the first element
    /// that does not as a [`TagError::InconsistentState`]. The methods of this type keep the
    /// list homogeneous, so this is a consistency check for the printer.
    pub fn check_homogeneous(&self) -> Result<(), TagError> {
        let Some(expected) = self.element_type else {
            return Ok(());
        };

        for (index, element) in self.elements.iter().enumerate() {
            let found = element.tag_type();
            if found != expected {
                return Err(TagError::InconsistentState { index, found, expected });
            }
        }
        Ok(())
    }

    /// Whether every element is written without brackets. Empty lists count as primitive.
    #[inline]
    pub fn is_primitive_only(&self) -> bool {
        self.elements.iter().all(SnbtTag::is_primitive)
    }

    /// Converts this list into SNBT with the default options, which is equivalent
    /// to `list.to_string()`.
    #[inline]
    pub fn to_snbt(&self) -> String {
        self.to_string()
    }

    /// Converts this list into SNBT.
    #[inline]
    pub fn to_snbt_with_options(&self, opts: &SnbtWriteOptions) -> String {
        ListWithOptions::new(self, opts).to_string()
    }
}

/// Two lists are equal if their elements are, regardless of the type a list
/// pinned before becoming empty.
impl PartialEq for SnbtList {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Deref for SnbtList {
    type Target = [SnbtTag];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl Index<usize> for SnbtList {
    type Output = SnbtTag;

    #[inline]
    fn index(&self, index: usize) -> &SnbtTag {
        &self.elements[index]
    }
}

/// Fails on the first element whose type differs from the first element's.
impl TryFrom<Vec<SnbtTag>> for SnbtList {
    type Error = TagError;

    fn try_from(elements: Vec<SnbtTag>) -> Result<Self, Self::Error> {
        let mut list = Self::with_capacity(elements.len());
        for element in elements {
            list.push(element)?;
        }
        Ok(list)
    }
}

impl IntoIterator for SnbtList {
    type IntoIter = std::vec::IntoIter<SnbtTag>;
    type Item = SnbtTag;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a SnbtList {
    type IntoIter = std::slice::Iter<'a, SnbtTag>;
    type Item = &'a SnbtTag;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
