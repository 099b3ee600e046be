//! On-disk submission record framing
//!
//! Each accepted submission appends one record to the log:
//!
//! ```text
//! +--------------------+
//! | Record Length      | (u32 LE, total including this field)
//! +--------------------+
//! | Paper ID           | (length-prefixed string)
//! +--------------------+
//! | Submitted At       | (length-prefixed string, RFC 3339 UTC seconds)
//! +--------------------+
//! | Payload            | (length-prefixed bytes, the accepted document)
//! +--------------------+
//! | Acceptance Record  | (length-prefixed bytes)
//! +--------------------+
//! | Checksum           | (u32 LE, CRC32 over everything above)
//! +--------------------+
//! ```
//!
//! The acceptance record currently mirrors the payload byte for byte but is
//! framed separately so later enrichment can diverge without a format change.

use std::io;

use super::checksum;

/// Smallest possible record: length, four empty length-prefixed fields,
/// checksum.
pub(crate) const MIN_RECORD_SIZE: usize = 4 + 4 + 4 + 4 + 4 + 4;

/// One framed submission record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// Submission identifier (log key; latest record wins)
    pub paper_id: String,
    /// Acceptance timestamp, RFC 3339 UTC at second precision
    pub submitted_at: String,
    /// Accepted document, serialized
    pub payload: Vec<u8>,
    /// Acceptance record, serialized
    pub acceptance: Vec<u8>,
}

impl SubmissionRecord {
    /// Serializes the record, computing the trailing checksum.
    pub fn serialize(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(
            16 + self.paper_id.len()
                + self.submitted_at.len()
                + self.payload.len()
                + self.acceptance.len(),
        );
        put_field(&mut body, self.paper_id.as_bytes());
        put_field(&mut body, self.submitted_at.as_bytes());
        put_field(&mut body, &self.payload);
        put_field(&mut body, &self.acceptance);

        let record_length = (4 + body.len() + 4) as u32;

        let mut framed = Vec::with_capacity(record_length as usize);
        framed.extend_from_slice(&record_length.to_le_bytes());
        framed.extend_from_slice(&body);
        let crc = checksum::crc32(&framed);
        framed.extend_from_slice(&crc.to_le_bytes());

        framed
    }

    /// Deserializes one record from the front of `data`, verifying framing
    /// and checksum. Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(invalid("record too short"));
        }

        let record_length =
            u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        if record_length < MIN_RECORD_SIZE {
            return Err(invalid(format!("invalid record length {}", record_length)));
        }
        if data.len() < record_length {
            return Err(invalid(format!(
                "record truncated: expected {} bytes, got {}",
                record_length,
                data.len()
            )));
        }

        let checksum_offset = record_length - 4;
        let stored = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        if !checksum::verify(&data[..checksum_offset], stored) {
            return Err(invalid(format!(
                "checksum mismatch: computed {:08x}, stored {:08x}",
                checksum::crc32(&data[..checksum_offset]),
                stored
            )));
        }

        let mut frame = Frame {
            data: &data[4..checksum_offset],
            pos: 0,
        };
        let paper_id = frame.take_string()?;
        let submitted_at = frame.take_string()?;
        let payload = frame.take_bytes()?;
        let acceptance = frame.take_bytes()?;
        if !frame.is_empty() {
            return Err(invalid("trailing bytes inside record body"));
        }

        Ok((
            Self {
                paper_id,
                submitted_at,
                payload,
                acceptance,
            },
            record_length,
        ))
    }
}

fn put_field(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    buf.extend_from_slice(bytes);
}

fn invalid(reason: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, reason.into())
}

/// Bounds-checked cursor over a record body.
struct Frame<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Frame<'a> {
    fn take_bytes(&mut self) -> io::Result<Vec<u8>> {
        if self.pos + 4 > self.data.len() {
            return Err(invalid("field length missing"));
        }
        let len = u32::from_le_bytes([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ]) as usize;
        self.pos += 4;
        if self.pos + len > self.data.len() {
            return Err(invalid("field extends past record body"));
        }
        let bytes = self.data[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(bytes)
    }

    fn take_string(&mut self) -> io::Result<String> {
        let bytes = self.take_bytes()?;
        String::from_utf8(bytes).map_err(|e| invalid(format!("invalid UTF-8: {}", e)))
    }

    fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }
}
