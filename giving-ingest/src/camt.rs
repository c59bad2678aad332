//! ISO 20022 camt grammar: typed views over camt.053 / camt.054 documents.
//!
//! The document is first read into a plain element tree; only XML syntax
//! errors and a missing root container fail the whole document. Each `Ntry`
//! is then viewed field by field, so a corrupt sub-field in one entry only
//! blanks that field. Deciding what a missing field means is left to
//! [`crate::entry`].

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

/// Why a document could not be read at all
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document has no root element")]
    NoRootElement,

    #[error("document ends inside <{0}>")]
    Truncated(String),

    #[error("missing container <{0}>")]
    MissingContainer(&'static str),
}

/// One XML element with namespace prefixes stripped from names
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Self {
        let attributes = start
            .attributes()
            .flatten()
            .filter_map(|attr| {
                let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
                let value = attr.unescape_value().ok()?.into_owned();
                Some((key, value))
            })
            .collect();

        Element {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            attributes,
            ..Default::default()
        }
    }

    fn children<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Repeated single-valued children: the last one wins.
    fn child(&self, name: &str) -> Option<&Element> {
        self.children(name).last()
    }

    /// Trimmed text of a leaf; an element with nested elements has no text value.
    fn leaf_text(&self) -> Option<String> {
        self.children
            .is_empty()
            .then(|| self.text.trim().to_string())
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            root.get_or_insert(element);
        }
    }
}

fn read_tree(xml: &str) -> Result<Element, GrammarError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::open(&start)),
            Event::Empty(start) => attach(&mut stack, &mut root, Element::open(&start)),
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    let value = text
                        .unescape()
                        .map(|s| s.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned());
                    top.text.push_str(&value);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(GrammarError::Truncated(open.name));
    }
    root.ok_or(GrammarError::NoRootElement)
}

/// One `Ntry` element, shared by both message variants
#[derive(Debug, Default)]
pub struct ReportEntry {
    pub amount: Option<Amount>,
    pub credit_debit_indicator: Option<String>,
    pub booking_date: Option<DateAndDateTime>,
    pub details: Vec<EntryDetails>,
}

impl ReportEntry {
    fn from_element(ntry: &Element) -> Self {
        ReportEntry {
            amount: ntry.child("Amt").map(|amt| Amount {
                currency: amt.attribute("Ccy").map(str::to_string),
                value: amt.leaf_text(),
            }),
            credit_debit_indicator: ntry.child("CdtDbtInd").and_then(Element::leaf_text),
            booking_date: ntry.child("BookgDt").map(|booked| DateAndDateTime {
                date: booked.child("Dt").and_then(Element::leaf_text),
                date_time: booked.child("DtTm").and_then(Element::leaf_text),
            }),
            details: ntry
                .children("NtryDtls")
                .map(|dtls| EntryDetails {
                    transactions: dtls
                        .children("TxDtls")
                        .map(TransactionDetails::from_element)
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Amount {
    pub currency: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Default)]
pub struct DateAndDateTime {
    pub date: Option<String>,
    pub date_time: Option<String>,
}

#[derive(Debug, Default)]
pub struct EntryDetails {
    pub transactions: Vec<TransactionDetails>,
}

#[derive(Debug, Default)]
pub struct TransactionDetails {
    pub related_parties: Option<RelatedParties>,
    pub remittance: Option<RemittanceInformation>,
}

impl TransactionDetails {
    fn from_element(tx: &Element) -> Self {
        TransactionDetails {
            related_parties: tx.child("RltdPties").map(|parties| RelatedParties {
                debtor: parties.child("Dbtr").map(|dbtr| PartyChoice {
                    party: dbtr.child("Pty").map(|pty| PartyIdentification {
                        name: pty.child("Nm").and_then(Element::leaf_text),
                    }),
                }),
            }),
            remittance: tx.child("RmtInf").map(|rmt| RemittanceInformation {
                structured: rmt
                    .children("Strd")
                    .map(|strd| StructuredRemittance {
                        creditor_reference: strd.child("CdtrRefInf").map(|inf| CreditorReference {
                            reference: inf.child("Ref").and_then(Element::leaf_text),
                        }),
                    })
                    .collect(),
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct RelatedParties {
    pub debtor: Option<PartyChoice>,
}

/// `Party40Choice`: a debtor is either a party or an agent
#[derive(Debug, Default)]
pub struct PartyChoice {
    pub party: Option<PartyIdentification>,
}

#[derive(Debug, Default)]
pub struct PartyIdentification {
    pub name: Option<String>,
}

#[derive(Debug, Default)]
pub struct RemittanceInformation {
    pub structured: Vec<StructuredRemittance>,
}

#[derive(Debug, Default)]
pub struct StructuredRemittance {
    pub creditor_reference: Option<CreditorReference>,
}

#[derive(Debug, Default)]
pub struct CreditorReference {
    pub reference: Option<String>,
}

/// Entries of every `group` under the root's `container`, in document order.
fn entries_under(
    xml: &str,
    container: &'static str,
    group: &str,
) -> Result<Vec<ReportEntry>, GrammarError> {
    let root = read_tree(xml)?;
    let report = root
        .child(container)
        .ok_or(GrammarError::MissingContainer(container))?;

    Ok(report
        .children(group)
        .flat_map(|g| g.children("Ntry"))
        .map(ReportEntry::from_element)
        .collect())
}

/// Parse a camt.053 document into its entries, statement by statement.
pub fn parse_statement_entries(xml: &str) -> Result<Vec<ReportEntry>, GrammarError> {
    entries_under(xml, "BkToCstmrStmt", "Stmt")
}

/// Parse a camt.054 document into its entries, notification by notification.
pub fn parse_notification_entries(xml: &str) -> Result<Vec<ReportEntry>, GrammarError> {
    entries_under(xml, "BkToCstmrDbtCdtNtfctn", "Ntfctn")
}
