//! Parser for reading-tracker CSV exports (Goodreads layout).
//!
//! Columns are located by header name rather than position, so exports with
//! extra or reordered columns still parse:
//!
//! ```text
//! Book Id,Title,Author,My Rating,Date Read,Date Added
//! 1,"Thinking, Fast and Slow",Daniel Kahneman,5,2024/03/05,2024/01/10
//! ```

use time::{macros::format_description, Date};

use super::{
    models::{ContentType, ImportedBook, NewLogEntry},
    ImportError, LogError,
};

const KEY_POINTS_PLACEHOLDER: &str = "Imported - add your key points";
const RATED_KEY_POINTS_SUFFIX: &str = "Add your key points here...";
const PRACTICAL_APPLICATION_PLACEHOLDER: &str = "Imported - add how you'll use this";
const SUMMARY_PLACEHOLDER: &str = "Imported - add your summary";

/// Star ratings a book may carry.
const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Header positions found in the first line.
#[derive(Debug, Default)]
struct Columns {
    title: Option<usize>,
    author: Option<usize>,
    date_read: Option<usize>,
    date_added: Option<usize>,
    rating: Option<usize>,
}

impl Columns {
    fn from_header(line: &str) -> Self {
        let headers = split_row(line)
            .into_iter()
            .map(|h| h.to_lowercase().replace('"', ""))
            .collect::<Vec<_>>();

        let find = |needles: &[&str]| {
            needles
                .iter()
                .find_map(|needle| headers.iter().position(|h| h.contains(needle)))
        };

        Self {
            title: find(&["title"]),
            author: find(&["author"]),
            date_read: find(&["date read", "dateread"]),
            date_added: find(&["date added", "dateadded"]),
            rating: find(&["my rating", "rating"]),
        }
    }
}

/// Parse every row that has a title. Rows without one and blank lines are
/// skipped. Books with no usable date are dated `today`.
pub fn parse_reading_export(text: &str, today: Date) -> Result<Vec<ImportedBook>, ImportError> {
    let mut lines = text.lines();
    let columns = lines
        .next()
        .map(Columns::from_header)
        .unwrap_or_default();

    let books = lines
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let values = split_row(line);
            let field = |index: Option<usize>| {
                index
                    .and_then(|i| values.get(i))
                    .map(|v| v.as_str())
                    .unwrap_or_default()
            };

            let title = field(columns.title);
            if title.is_empty() {
                return None;
            }

            let consumed_date = parse_date(field(columns.date_read))
                .or_else(|| parse_date(field(columns.date_added)))
                .unwrap_or(today);

            let rating = field(columns.rating)
                .parse::<u8>()
                .ok()
                .filter(|r| RATING_RANGE.contains(r));

            Some(ImportedBook {
                title: title.to_string(),
                creator: field(columns.author).to_string(),
                consumed_date,
                rating,
            })
        })
        .collect::<Vec<_>>();

    if books.is_empty() {
        return Err(ImportError::NoBooksFound);
    }

    Ok(books)
}

/// Split one CSV row on commas outside double quotes. Inside quotes, `""`
/// is a literal quote. Fields are trimmed.
fn split_row(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches('\r').chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    values.push(current.trim().to_string());

    values
}

/// Accepts `2024/03/05` (Goodreads) and `2024-03-05`.
fn parse_date(value: &str) -> Option<Date> {
    let normalized = value.trim().replace('/', "-");
    if normalized.is_empty() {
        return None;
    }
    Date::parse(&normalized, format_description!("[year]-[month]-[day]")).ok()
}

/// The private log entry an imported book becomes. Books arriving from a
/// client are not trusted to carry a rating in range.
pub fn imported_log_entry(book: &ImportedBook) -> Result<NewLogEntry, LogError> {
    let key_points = match book.rating {
        Some(rating) if !RATING_RANGE.contains(&rating) => {
            return Err(LogError::Invalid(format!(
                "rating must be between 1 and 5, got {rating}"
            )));
        }
        Some(rating) => format!(
            "{} ({}/5 stars)\n\n{}",
            "⭐".repeat(rating as usize),
            rating,
            RATED_KEY_POINTS_SUFFIX
        ),
        None => KEY_POINTS_PLACEHOLDER.to_string(),
    };

    NewLogEntry::new(
        ContentType::Book,
        &book.title,
        Some(&book.creator),
        book.consumed_date,
        &key_points,
        PRACTICAL_APPLICATION_PLACEHOLDER,
        SUMMARY_PLACEHOLDER,
        false,
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    const TODAY: Date = date!(2024 - 06 - 01);

    const GOODREADS: &str = "Book Id,Title,Author,Author l-f,My Rating,Average Rating,Date Read,Date Added\r\n\
        1,\"Thinking, Fast and Slow\",Daniel Kahneman,\"Kahneman, Daniel\",5,4.18,2024/03/05,2024/01/10\r\n\
        2,Deep Work,Cal Newport,\"Newport, Cal\",0,4.19,,2023/12/24\r\n\
        \r\n\
        3,,Nobody,\"Nobody, \",3,3.00,,\n\
        4,\"The \"\"Quoted\"\" Book\",Someone,\"Someone, \",7,3.00,,\n";

    #[test]
    fn parses_goodreads_export() {
        let books = parse_reading_export(GOODREADS, TODAY).unwrap();

        assert_eq!(books.len(), 3);

        assert_eq!(books[0].title, "Thinking, Fast and Slow");
        assert_eq!(books[0].creator, "Daniel Kahneman");
        assert_eq!(books[0].consumed_date, date!(2024 - 03 - 05));
        assert_eq!(books[0].rating, Some(5));

        assert_eq!(books[1].title, "Deep Work");
        assert_eq!(books[1].consumed_date, date!(2023 - 12 - 24));
        assert_eq!(books[1].rating, None);
    }

    #[test]
    fn escaped_quotes_and_out_of_range_rating() {
        let books = parse_reading_export(GOODREADS, TODAY).unwrap();

        assert_eq!(books[2].title, "The \"Quoted\" Book");
        assert_eq!(books[2].rating, None);
        assert_eq!(books[2].consumed_date, TODAY);
    }

    #[test]
    fn prefers_my_rating_over_average() {
        let csv = "Title,Average Rating,My Rating\nA,4.5,2\n";
        let books = parse_reading_export(csv, TODAY).unwrap();
        assert_eq!(books[0].rating, Some(2));
    }

    #[test]
    fn header_lookup_is_case_insensitive_and_quote_tolerant() {
        let csv = "\"TITLE\",\"AUTHOR\",\"DATEREAD\"\n\"Dune\",\"Frank Herbert\",\"2020-05-01\"\n";
        let books = parse_reading_export(csv, TODAY).unwrap();
        assert_eq!(books[0].creator, "Frank Herbert");
        assert_eq!(books[0].consumed_date, date!(2020 - 05 - 01));
    }

    #[test]
    fn no_title_column_finds_nothing() {
        let csv = "Name,Writer\nDune,Frank Herbert\n";
        assert_eq!(
            parse_reading_export(csv, TODAY),
            Err(ImportError::NoBooksFound)
        );
        assert_eq!(parse_reading_export("", TODAY), Err(ImportError::NoBooksFound));
    }

    #[test]
    fn split_row_handles_trailing_empty_field() {
        assert_eq!(split_row("a, b ,"), vec!["a", "b", ""]);
    }

    #[test]
    fn imported_entry_uses_rating_template() {
        let book = ImportedBook {
            title: "Dune".into(),
            creator: "Frank Herbert".into(),
            consumed_date: TODAY,
            rating: Some(3),
        };

        let entry = imported_log_entry(&book).unwrap();
        assert_eq!(entry.content_type, ContentType::Book);
        assert!(!entry.is_shared);
        assert_eq!(
            entry.key_points,
            "⭐⭐⭐ (3/5 stars)\n\nAdd your key points here..."
        );
        assert_eq!(entry.summary, SUMMARY_PLACEHOLDER);
    }

    #[test]
    fn imported_entry_rejects_out_of_range_rating() {
        for rating in [0, 6, 9] {
            let book = ImportedBook {
                title: "Dune".into(),
                creator: "Frank Herbert".into(),
                consumed_date: TODAY,
                rating: Some(rating),
            };

            let err = imported_log_entry(&book).unwrap_err();
            assert!(matches!(err, LogError::Invalid(msg) if msg.contains("rating")));
        }
    }

    #[test]
    fn imported_entry_without_rating_or_author() {
        let book = ImportedBook {
            title: "Anonymous Pamphlet".into(),
            creator: String::new(),
            consumed_date: TODAY,
            rating: None,
        };

        let entry = imported_log_entry(&book).unwrap();
        assert_eq!(entry.key_points, KEY_POINTS_PLACEHOLDER);
        assert_eq!(entry.creator, None);
    }
}
