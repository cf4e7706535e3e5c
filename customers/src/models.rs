pub use csv;

use {
    crate::Record,
    serde::Deserialize,
    std::io,
};

/// Column names, in output order.
pub const HEADER: [&str; 5] = ["CustomerID", "FirstName", "LastName", "Email", "Phone"];

#[derive(Debug, Deserialize)]
pub struct RecordModel {
    #[serde(rename = "CustomerID")]
    pub customer_id: u64,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
}

impl From<Record> for RecordModel {
    fn from(r: Record) -> Self {
        RecordModel {
            customer_id: r.customer_id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
        }
    }
}

impl From<RecordModel> for Record {
    fn from(m: RecordModel) -> Self {
        Record {
            customer_id: m.customer_id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
        }
    }
}

pub fn write_header<W>(writer: &mut csv::Writer<W>) -> csv::Result<()>
where
    W: io::Write,
{
    writer.write_record(HEADER)
}

impl RecordModel {
    /// Writes one row. Quoting of delimiters, quotes and line breaks is left
    /// to the writer.
    pub fn serialize_csv<W>(self, writer: &mut csv::Writer<W>) -> csv::Result<()>
    where
        W: io::Write,
    {
        writer.write_field(self.customer_id.to_string())?;
        writer.write_field(self.first_name)?;
        writer.write_field(self.last_name)?;
        writer.write_field(self.email)?;
        writer.write_field(self.phone)?;
        writer.write_record(None::<&[u8]>)
    }

    /// Reads every row after the header back into records.
    pub fn deserialize_csv<R>(reader: &mut csv::Reader<R>) -> csv::Result<Vec<Record>>
    where
        R: io::Read,
    {
        reader
            .deserialize::<RecordModel>()
            .map(|row| row.map(Record::from))
            .collect()
    }
}
