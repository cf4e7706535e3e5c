//! In-memory view over a generated customer file.
//!
//! Lets fixture consumers look records up, search, page through them and
//! edit them before writing the file back.

use {
    crate::{
        Id, Record,
        error::{self, Error, StoreError},
        models::{self, RecordModel},
    },
    std::{collections::BTreeMap, path::Path},
    tracing::debug,
};

/// Field values for a new or replaced customer. Every field must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl NewCustomer {
    fn validate(&self) -> Result<(), StoreError> {
        let fields = [
            ("FirstName", &self.first_name),
            ("LastName", &self.last_name),
            ("Email", &self.email),
            ("Phone", &self.phone),
        ];
        match fields.into_iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(StoreError::MissingField(name)),
            None => Ok(()),
        }
    }

    fn into_record(self, customer_id: Id) -> Record {
        Record {
            customer_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// Per-field substring filters. Set filters must all match; unset ones are
/// ignored. `name` matches either the first or the last name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchFilter<'a> {
    pub phone: Option<&'a str>,
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
}

/// Case-insensitive substring test.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Slices one 1-based page out of `records`. Page 0 is treated as page 1.
pub fn paginate<'a, I>(records: I, page: usize, page_size: usize) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let offset = page.saturating_sub(1).saturating_mul(page_size);
    records.into_iter().skip(offset).take(page_size).collect()
}

/// Customers ordered by id. New ids continue after the highest id ever held,
/// so removed ids are not handed out again.
#[derive(Debug)]
pub struct Store {
    records: BTreeMap<Id, Record>,
    next_id: Id,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let records: BTreeMap<Id, Record> =
            records.into_iter().map(|r| (r.customer_id, r)).collect();
        let next_id = records.keys().next_back().map_or(1, |id| id + 1);
        Self { records, next_id }
    }

    /// Reads a file written by [`generate_file`](crate::generate_file).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let failed = |source: csv::Error| StoreError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::Reader::from_path(path).map_err(failed)?;
        let records = RecordModel::deserialize_csv(&mut reader).map_err(failed)?;
        debug!(path = %path.display(), rows = records.len(), "customers loaded");

        Ok(Self::from_records(records))
    }

    /// Writes every customer back out in id order, replacing the file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<u64> {
        let path = path.as_ref();
        let failed = |e: csv::Error| Error::output_write(path, error::into_io(e));

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(failed)?;
        models::write_header(&mut writer).map_err(failed)?;
        for record in self.records.values() {
            RecordModel::from(record.clone())
                .serialize_csv(&mut writer)
                .map_err(failed)?;
        }
        writer
            .flush()
            .map_err(|e| Error::output_write(path, e))?;

        Ok(self.records.len() as u64)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: Id) -> Result<&Record, StoreError> {
        self.records.get(&id).ok_or(StoreError::NotFound(id))
    }

    /// Matches `q` against the exact id or a substring of any text field.
    /// An empty query matches everything.
    pub fn search(&self, q: &str) -> Vec<&Record> {
        let q = q.trim();
        if q.is_empty() {
            return self.records.values().collect();
        }
        let id = q.parse::<Id>().ok();

        self.records
            .values()
            .filter(|r| {
                Some(r.customer_id) == id
                    || contains(&r.first_name, q)
                    || contains(&r.last_name, q)
                    || contains(&r.email, q)
                    || contains(&r.phone, q)
            })
            .collect()
    }

    pub fn filter(&self, filter: &SearchFilter<'_>) -> Vec<&Record> {
        self.records
            .values()
            .filter(|r| filter.phone.is_none_or(|p| contains(&r.phone, p)))
            .filter(|r| {
                filter
                    .name
                    .is_none_or(|n| contains(&r.first_name, n) || contains(&r.last_name, n))
            })
            .filter(|r| filter.email.is_none_or(|e| contains(&r.email, e)))
            .collect()
    }

    pub fn page(&self, page: usize, page_size: usize) -> Vec<&Record> {
        paginate(self.records.values(), page, page_size)
    }

    pub fn add(&mut self, customer: NewCustomer) -> Result<&Record, StoreError> {
        customer.validate()?;
        self.check_email(&customer.email, None)?;

        let id = self.next_id;
        self.next_id += 1;
        Ok(self
            .records
            .entry(id)
            .or_insert(customer.into_record(id)))
    }

    pub fn update(&mut self, id: Id, customer: NewCustomer) -> Result<&Record, StoreError> {
        customer.validate()?;
        if !self.records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        self.check_email(&customer.email, Some(id))?;

        let record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *record = customer.into_record(id);
        Ok(record)
    }

    pub fn remove(&mut self, id: Id) -> Result<Record, StoreError> {
        self.records.remove(&id).ok_or(StoreError::NotFound(id))
    }

    /// Emails are unique ignoring case; `except` skips the record being replaced.
    fn check_email(&self, email: &str, except: Option<Id>) -> Result<(), StoreError> {
        let taken = self.records.values().any(|r| {
            Some(r.customer_id) != except && r.email.to_lowercase() == email.to_lowercase()
        });
        if taken {
            Err(StoreError::DuplicateEmail(email.to_string()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, tempfile::TempDir};

    fn customer(first_name: &str, last_name: &str, email: &str, phone: &str) -> NewCustomer {
        NewCustomer {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    fn sample() -> Store {
        let mut store = Store::new();
        store
            .add(customer("Ann", "Smith", "ann@example.com", "555-0101"))
            .unwrap();
        store
            .add(customer("Bob", "Jones", "bob@example.org", "555-0102"))
            .unwrap();
        store
            .add(customer("Carla", "Annis", "carla@example.net", "(313) 555-0199"))
            .unwrap();
        store
    }

    fn ids(records: Vec<&Record>) -> Vec<Id> {
        records.into_iter().map(|r| r.customer_id).collect()
    }

    #[test]
    fn find_by_id() {
        let store = sample();

        assert_eq!(store.find(2).unwrap().first_name, "Bob");
        assert!(matches!(store.find(9), Err(StoreError::NotFound(9))));
    }

    #[test]
    fn search_by_id_or_substring() {
        let store = sample();

        assert_eq!(ids(store.search("2")), vec![2]);
        assert_eq!(ids(store.search("ann")), vec![1, 3]);
        assert_eq!(ids(store.search("EXAMPLE.ORG")), vec![2]);
        assert_eq!(ids(store.search("(313)")), vec![3]);
        assert!(store.search("nobody").is_empty());
        assert_eq!(store.search("  ").len(), 3);
    }

    #[test]
    fn search_digits_also_match_phone() {
        let store = sample();

        assert_eq!(ids(store.search("0102")), vec![2]);
    }

    #[test]
    fn filter_combines_fields() {
        let store = sample();

        let by_name = SearchFilter {
            name: Some("ann"),
            ..Default::default()
        };
        assert_eq!(ids(store.filter(&by_name)), vec![1, 3]);

        let narrowed = SearchFilter {
            phone: Some("0199"),
            ..by_name
        };
        assert_eq!(ids(store.filter(&narrowed)), vec![3]);
        assert_eq!(store.filter(&SearchFilter::default()).len(), 3);
    }

    #[test]
    fn pages_are_one_based() {
        let store = Store::from_records((1..=25).map(|id| {
            customer("F", "L", &format!("c{id}@example.com"), "555").into_record(id)
        }));

        assert_eq!(ids(store.page(1, 10)), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(store.page(3, 10)), (21..=25).collect::<Vec<_>>());
        assert!(store.page(4, 10).is_empty());
        assert_eq!(ids(store.page(0, 2)), vec![1, 2]);
        assert!(store.page(1, 0).is_empty());
        assert_eq!(ids(paginate(store.search("c2"), 2, 3)), vec![22, 23, 24]);
    }

    #[test]
    fn add_requires_every_field() {
        let mut store = sample();

        let err = store
            .add(customer("Dan", "", "dan@example.com", "555"))
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingField("LastName")));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn add_rejects_duplicate_email() {
        let mut store = sample();

        let err = store
            .add(customer("Ann", "Other", "ANN@example.com", "555"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn ids_are_not_reused_after_remove() {
        let mut store = sample();

        assert_eq!(store.remove(3).unwrap().first_name, "Carla");
        let added = store
            .add(customer("Dan", "Brown", "dan@example.com", "555"))
            .unwrap();
        assert_eq!(added.customer_id, 4);
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut store = sample();

        assert!(matches!(store.remove(7), Err(StoreError::NotFound(7))));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn update_replaces_fields() {
        let mut store = sample();

        store
            .update(2, customer("Robert", "Jones", "bob@example.org", "555-0102"))
            .unwrap();
        assert_eq!(store.find(2).unwrap().first_name, "Robert");

        assert!(matches!(
            store.update(2, customer("Robert", "Jones", "ann@example.com", "555")),
            Err(StoreError::DuplicateEmail(_))
        ));
        assert!(matches!(
            store.update(8, customer("X", "Y", "x@example.com", "1")),
            Err(StoreError::NotFound(8))
        ));
        assert!(matches!(
            store.update(2, customer("X", "Y", "x@example.com", "")),
            Err(StoreError::MissingField("Phone"))
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("customers.csv");
        let store = sample();

        assert_eq!(store.save(&path).unwrap(), 3);
        let loaded = Store::load(&path).unwrap();

        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.find(3).unwrap(), store.find(3).unwrap());
        assert_eq!(loaded.next_id, 4);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = TempDir::new().unwrap();

        let err = Store::load(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
