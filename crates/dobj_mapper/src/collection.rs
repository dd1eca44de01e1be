use alloc::string::String;
use alloc::vec::Vec;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::Result;
use crate::ser::{FieldValue, SerializeOptions};
use crate::{DataObject, Record, ToRecord, Value};

/// A page of data objects with its pagination envelope.
///
/// # Examples
///
/// ```
/// use dobj_mapper::{Collection, DataObject};
/// use serde_json::json;
///
/// #[derive(DataObject, Debug)]
/// struct Developer {
///     name: String,
/// }
///
/// let rows = [json!({ "name": "Ali" }), json!({ "name": "Vali" })];
/// let page = Collection::<Developer>::from_records(&rows, 12, 2, 1).unwrap();
///
/// assert_eq!(page.len(), 2);
/// assert_eq!(page.last_page(), 6);
/// assert_eq!(
///     json!(page.to_array(false)),
///     json!({
///         "items": [{ "name": "Ali" }, { "name": "Vali" }],
///         "totalCount": 12,
///         "limit": 2,
///         "page": 1,
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub limit: u64,
    pub page: u64,
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>, total_count: u64, limit: u64, page: u64) -> Self {
        Self {
            items,
            total_count,
            limit,
            page,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of the last page, at least `1`.
    ///
    /// A `limit` of zero means everything fits on one page.
    pub fn last_page(&self) -> u64 {
        match self.limit {
            0 => 1,
            limit => self.total_count.div_ceil(limit).max(1),
        }
    }
}

impl<T: DataObject> Collection<T> {
    /// Hydrates every record source into a `T`.
    pub fn from_records<R: ToRecord>(
        records: &[R],
        total_count: u64,
        limit: u64,
        page: u64,
    ) -> Result<Self> {
        let items = records
            .iter()
            .map(T::from_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(items, total_count, limit, page))
    }

    /// Serializes into `{items, totalCount, limit, page}`.
    pub fn to_array(&self, trim_nulls: bool) -> Record {
        let options = SerializeOptions::new().with_trim_nulls(trim_nulls);

        let mut record = Record::new();
        record.insert(String::from("items"), self.items.to_value(options));
        record.insert(String::from("totalCount"), Value::from(self.total_count));
        record.insert(String::from("limit"), Value::from(self.limit));
        record.insert(String::from("page"), Value::from(self.page));
        record
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: DataObject> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let items = self.items.to_value(SerializeOptions::new());

        let mut state = serializer.serialize_struct("Collection", 4)?;
        state.serialize_field("items", &items)?;
        state.serialize_field("totalCount", &self.total_count)?;
        state.serialize_field("limit", &self.limit)?;
        state.serialize_field("page", &self.page)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Collection;
    use crate::DataObject;

    #[derive(DataObject, Debug, PartialEq)]
    struct Tag {
        label: String,
        weight: Option<u32>,
    }

    #[test]
    fn last_page_bounds() {
        let page = |total, limit| Collection::<Tag>::new(Vec::new(), total, limit, 1).last_page();
        assert_eq!(page(0, 10), 1);
        assert_eq!(page(10, 10), 1);
        assert_eq!(page(11, 10), 2);
        assert_eq!(page(5, 0), 1);
    }

    #[test]
    fn serde_matches_to_array() {
        let rows = [json!({ "label": "rust", "weight": 3 }), json!({ "label": "php" })];
        let page = Collection::<Tag>::from_records(&rows, 2, 20, 1).unwrap();

        assert_eq!(serde_json::to_value(&page).unwrap(), json!(page.to_array(false)));
        assert_eq!(page.iter().map(|t| t.label.as_str()).collect::<Vec<_>>(), ["rust", "php"]);
        assert_eq!(
            json!(page.to_array(true))["items"][1],
            json!({ "label": "php" })
        );
    }

    #[derive(DataObject, Debug)]
    struct Release {
        name: String,
        date: chrono::NaiveDate,
    }

    #[test]
    fn failing_record_fails_the_page() {
        let rows = [
            json!({ "name": "1.0", "date": "2024-01-31" }),
            json!({ "name": "1.1", "date": "soon" }),
        ];
        let err = Collection::<Release>::from_records(&rows, 2, 20, 1).unwrap_err();
        assert_eq!(err.field_path(), Some("date"));

        let page = Collection::<Release>::from_records(&rows[..1], 1, 20, 1).unwrap();
        assert_eq!(page.into_iter().next().unwrap().name, "1.0");
    }
}
