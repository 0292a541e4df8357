use crate::{
    error::D2Error,
    record::{ObjectLookupRecord, FIELD_COUNT},
};
use csv::{ReaderBuilder, StringRecord, Terminator};
use fallible_iterator::{FallibleIterator, IteratorExt};
use std::{
    collections::HashMap,
    fmt::Debug,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct ObjectKey {
    act: i32,
    typ: i32,
    id: i32,
}

impl From<&ObjectLookupRecord> for ObjectKey {
    fn from(record: &ObjectLookupRecord) -> Self {
        Self {
            act: record.act,
            typ: record.typ,
            id: record.id,
        }
    }
}

/// Immutable table of object lookup rows in load order.
#[derive(Clone)]
pub struct ObjectLookupTable {
    records: Vec<ObjectLookupRecord>,
    index: HashMap<ObjectKey, usize>,
}

impl ObjectLookupTable {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, D2Error> {
        let file = File::open(path.as_ref()).map_err(D2Error::IO)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn parse(text: &str) -> Result<Self, D2Error> {
        Self::from_reader(text.as_bytes())
    }

    /// Reads `\n` separated rows of tab separated fields.
    ///
    /// Every non-blank line yields one record in line order. Blank lines,
    /// including a bare `\r` left by CRLF endings, yield none. A `\r` that
    /// ends a line is dropped; one anywhere else is kept as field text.
    /// Short rows are padded with empty fields and fields past the last
    /// column are dropped. Integer columns that do not hold a number read
    /// as 0. Only I/O failures and non UTF-8 input are errors.
    pub fn from_reader(reader: impl Read) -> Result<Self, D2Error> {
        let records: Vec<ObjectLookupRecord> = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(reader)
            .into_records()
            .transpose_into_fallible()
            .map_err(D2Error::from)
            .filter(|row| Ok(!is_blank(row)))
            .map(|row| read_row(&row))
            .collect()?;

        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<ObjectLookupRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            // first row wins for duplicated keys
            index.entry(ObjectKey::from(record)).or_insert(position);
        }

        tracing::debug!(
            records = records.len(),
            keys = index.len(),
            "loaded object lookup table"
        );
        Self { records, index }
    }

    /// First row carrying `(act, typ, id)`, if any.
    pub fn get(&self, act: i32, typ: impl Into<i32>, id: i32) -> Option<&ObjectLookupRecord> {
        let key = ObjectKey {
            act,
            typ: typ.into(),
            id,
        };
        self.index.get(&key).and_then(|&position| self.records.get(position))
    }

    /// First row carrying `(act, typ, id)`.
    ///
    /// # Panics
    ///
    /// Panics when no row matches. Table data ships with the code that
    /// queries it, so a miss is a bug rather than a runtime condition.
    pub fn find(&self, act: i32, typ: impl Into<i32>, id: i32) -> &ObjectLookupRecord {
        let typ = typ.into();
        match self.get(act, typ, id) {
            Some(record) => record,
            None => {
                tracing::error!(act, typ, id, "object lookup failed");
                panic!("Failed to look up object Act: {act}, Type: {typ}, ID: {id}");
            }
        }
    }

    /// Rows of one act and type, in load order.
    pub fn in_act_of_type(
        &self,
        act: i32,
        typ: impl Into<i32>,
    ) -> impl Iterator<Item = &ObjectLookupRecord> {
        let typ = typ.into();
        self.records
            .iter()
            .filter(move |record| record.act == act && record.typ == typ)
    }

    pub fn records(&self) -> &[ObjectLookupRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectLookupRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObjectLookupTable {
    type Item = &'a ObjectLookupRecord;
    type IntoIter = std::slice::Iter<'a, ObjectLookupRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for ObjectLookupTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "ObjectLookupTable {{ {} records }}",
            self.records.len()
        ))
    }
}

/// Fields of one line without the `\r` of a CRLF ending.
fn line_fields(row: &StringRecord) -> impl Iterator<Item = &str> {
    let last = row.len().saturating_sub(1);
    row.iter().enumerate().map(move |(i, field)| {
        if i == last {
            field.strip_suffix('\r').unwrap_or(field)
        } else {
            field
        }
    })
}

fn is_blank(row: &StringRecord) -> bool {
    row.len() <= 1 && line_fields(row).all(str::is_empty)
}

fn read_row(row: &StringRecord) -> Result<ObjectLookupRecord, D2Error> {
    let mut fields: StringRecord = line_fields(row).take(FIELD_COUNT).collect();
    while fields.len() < FIELD_COUNT {
        fields.push_field("");
    }
    fields.set_position(row.position().cloned());

    fields.deserialize(None).map_err(D2Error::from)
}
