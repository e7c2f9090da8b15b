//! Delimited transaction results.
//!
//! Customer profile calls report the outcome of the underlying card transaction as a
//! comma-delimited `directResponse` string instead of a JSON object. [`TransactionResponse`]
//! splits that string and looks fields up by 1-based position or by name.

/// Field names and their 1-based positions in a delimited transaction result.
const FIELD_POSITIONS: &[(&str, usize)] = &[
    ("ResponseCode", 1),
    ("ResponseSubcode", 2),
    ("ResponseReasonCode", 3),
    ("ResponseReasonText", 4),
    ("AuthorizationCode", 5),
    ("AVSResponse", 6),
    ("TransactionID", 7),
    ("InvoiceNumber", 8),
    ("Description", 9),
    ("Amount", 10),
    ("Method", 11),
    ("TransactionType", 12),
    ("CustomerID", 13),
    ("FirstName", 14),
    ("LastName", 15),
    ("Company", 16),
    ("Address", 17),
    ("City", 18),
    ("State", 19),
    ("ZipCode", 20),
    ("Country", 21),
    ("Phone", 22),
    ("Fax", 23),
    ("EmailAddress", 24),
    ("ShipToFirstName", 25),
    ("ShipToLastName", 26),
    ("ShipToCompany", 27),
    ("ShipToAddress", 28),
    ("ShipToCity", 29),
    ("ShipToState", 30),
    ("ShipToZip", 31),
    ("ShipToCountry", 32),
    ("Tax", 33),
    ("Duty", 34),
    ("Freight", 35),
    ("TaxExempt", 36),
    ("PurchaseOrder", 37),
    ("MD5Hash", 38),
    ("CardCodeResponse", 39),
    ("CavvResponse", 40),
    ("AccountNumber", 51),
    ("CardType", 52),
    ("SplitTenderId", 53),
    ("AmountRequested", 54),
    ("BalanceOnCard", 55),
];

const DELIMITER: char = ',';

/// Identifies a field of a [`TransactionResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionField<'a> {
    /// Field name, e.g. `"TransactionID"`.
    Name(&'a str),
    /// 1-based field position.
    Position(usize),
}

impl<'a> From<&'a str> for TransactionField<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for TransactionField<'_> {
    fn from(position: usize) -> Self {
        Self::Position(position)
    }
}

/// A parsed delimited transaction result.
///
/// # Examples
///
/// ```
/// use authnet_json::response::TransactionResponse;
///
/// let tx = TransactionResponse::new("1,1,1,This transaction has been approved.,A1B2C3,Y,2230582188");
///
/// assert_eq!(tx.field("ResponseCode"), Some("1"));
/// assert_eq!(tx.field(7), Some("2230582188"));
/// assert_eq!(tx.response_code(), Some(1));
/// assert_eq!(tx.field("NoSuchField"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResponse {
    raw: String,
    fields: Vec<String>,
}

impl TransactionResponse {
    /// Splits a delimited transaction result into fields.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let fields = raw.split(DELIMITER).map(str::to_owned).collect();
        Self { raw, fields }
    }

    /// Looks a field up by name or 1-based position.
    ///
    /// Unknown names and positions past the end resolve to `None`.
    #[must_use]
    pub fn field<'f>(&self, field: impl Into<TransactionField<'f>>) -> Option<&str> {
        let position = match field.into() {
            TransactionField::Name(name) => position_of(name)?,
            TransactionField::Position(position) => position,
        };
        self.fields.get(position.checked_sub(1)?).map(String::as_str)
    }

    /// Returns the numeric `ResponseCode` field.
    #[must_use]
    pub fn response_code(&self) -> Option<i64> {
        self.field("ResponseCode")?.trim().parse().ok()
    }

    /// Returns the number of fields in the result.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the result has no fields.
    ///
    /// Splitting always yields at least one (possibly empty) field, so this only holds for
    /// values built by hand.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the result exactly as the gateway sent it.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

fn position_of(name: &str) -> Option<usize> {
    FIELD_POSITIONS.iter().find(|(field, _)| *field == name).map(|(_, position)| *position)
}
