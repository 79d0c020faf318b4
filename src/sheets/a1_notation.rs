use std::fmt::Formatter;

/// A range reference such as `Sheet1!A1:B2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct A1Notation(String);

impl A1Notation {
    /// Prefixes a sheet-local range with its sheet name. Nothing is quoted or validated.
    pub fn on_sheet(sheet_name: &str, range: &str) -> Self {
        A1Notation(format!("{}!{}", sheet_name, range))
    }
}

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Binds every range of a payload to one sheet.
#[derive(Debug, Clone)]
pub struct SheetRanges<'a> {
    sheet_name: &'a str,
}

impl<'a> SheetRanges<'a> {
    pub fn new(sheet_name: &'a str) -> Self {
        Self { sheet_name }
    }

    pub fn range(&self, range: &str) -> A1Notation {
        A1Notation::on_sheet(self.sheet_name, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_sheet_concatenates() {
        assert_eq!(
            A1Notation::on_sheet("Sheet1", "A1:B2").as_ref(),
            "Sheet1!A1:B2"
        );
    }

    #[test]
    fn test_sheet_name_is_not_quoted() {
        let a1 = SheetRanges::new("My List").range("C3");
        assert_eq!(a1.to_string(), "My List!C3");
        assert_eq!(a1, A1Notation::on_sheet("My List", "C3"));
    }

    #[test]
    fn test_single_cell_range() {
        assert_eq!(String::from(SheetRanges::new("Data").range("B7")), "Data!B7");
    }
}
