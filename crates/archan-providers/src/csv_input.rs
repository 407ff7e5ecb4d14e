//! DSM from a CSV file.
//!
//! ```text
//! ,app.a,app.b,bus
//! app.a:app_module,0,0,1
//! app.b:app_module,0,0,1
//! bus:broker,1,1,0
//! ```
//!
//! The first line lists column entities (its first cell is ignored). Each
//! following line starts with the row entity, optionally suffixed with its
//! category after `categories_delimiter`, then one count per column.

use archan_core::{
    ArgumentSpec, Arguments, Category, Data, DesignStructureMatrix, Provider, ProviderContext,
    ProviderError,
};
use std::path::Path;

use crate::input::read_input;

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::required("file_path", "CSV file to read, `-` for standard input"),
    ArgumentSpec::optional("delimiter", "Cell delimiter (default: `,`)"),
    ArgumentSpec::optional(
        "categories_delimiter",
        "Separator between entity and category in row names (e.g. `:`)",
    ),
];

/// Reads a DSM from CSV.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvInput;

impl CsvInput {
    /// Creates the provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Provider for CsvInput {
    fn identifier(&self) -> &'static str {
        "archan.CSVInput"
    }

    fn name(&self) -> &'static str {
        "CSV Input"
    }

    fn description(&self) -> &'static str {
        "Read a DSM from a CSV file or standard input"
    }

    fn arguments(&self) -> &'static [ArgumentSpec] {
        ARGUMENTS
    }

    fn get_data(&self, ctx: &ProviderContext, args: &Arguments) -> Result<Data, ProviderError> {
        let file_path = args.require_str("file_path")?;
        let delimiter = args.get_str("delimiter", ",");
        let categories_delimiter = args.raw("categories_delimiter").and_then(|v| v.as_str());

        let (path, content) = read_input(ctx, file_path)?;
        let dsm = parse_csv(&content, delimiter, categories_delimiter, &path)?;
        Ok(dsm.into())
    }
}

fn parse_error(path: &Path, line: usize, message: impl std::fmt::Display) -> ProviderError {
    ProviderError::Parse {
        path: path.to_path_buf(),
        message: format!("line {line}: {message}"),
    }
}

fn split_entity<'a>(
    cell: &'a str,
    categories_delimiter: Option<&str>,
    path: &Path,
    line: usize,
) -> Result<(&'a str, Option<Category>), ProviderError> {
    let Some(sep) = categories_delimiter else {
        return Ok((cell, None));
    };
    match cell.split_once(sep) {
        Some((entity, category)) => {
            let category = category
                .parse::<Category>()
                .map_err(|e| parse_error(path, line, e))?;
            Ok((entity.trim(), Some(category)))
        }
        None => Err(parse_error(
            path,
            line,
            format!("'{cell}' has no category after '{sep}'"),
        )),
    }
}

/// Parses CSV text into a DSM.
///
/// # Errors
///
/// Returns [`ProviderError::Parse`] for malformed lines and
/// [`ProviderError::Dsm`] when the rows do not form a square matrix.
pub fn parse_csv(
    content: &str,
    delimiter: &str,
    categories_delimiter: Option<&str>,
    path: &Path,
) -> Result<DesignStructureMatrix, ProviderError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(n, l)| (n + 1, l.trim_end()))
        .filter(|(_, l)| !l.is_empty());

    let Some((header_line, header)) = lines.next() else {
        return Err(parse_error(path, 1, "empty input"));
    };
    let columns: Vec<&str> = header.split(delimiter).skip(1).map(str::trim).collect();

    let mut entities = Vec::new();
    let mut categories = Vec::new();
    let mut data = Vec::new();

    for (line, text) in lines {
        let mut cells = text.split(delimiter).map(str::trim);
        let first = cells.next().unwrap_or_default();
        let (entity, category) = split_entity(first, categories_delimiter, path, line)?;

        let row = cells
            .map(|cell| {
                if cell.is_empty() {
                    Ok(0)
                } else {
                    cell.parse::<u32>()
                        .map_err(|e| parse_error(path, line, format!("'{cell}': {e}")))
                }
            })
            .collect::<Result<Vec<u32>, _>>()?;

        if row.len() != columns.len() {
            return Err(parse_error(
                path,
                line,
                format!("{} value(s) for {} column(s)", row.len(), columns.len()),
            ));
        }

        entities.push(entity.to_string());
        categories.extend(category);
        data.push(row);
    }

    for (i, &column) in columns.iter().enumerate() {
        let (column, _) = split_entity(column, categories_delimiter, path, header_line)
            .unwrap_or((column, None));
        if let Some(entity) = entities.get(i) {
            if entity != column {
                return Err(parse_error(
                    path,
                    header_line,
                    format!("column {} is '{column}' but row {} is '{entity}'", i + 1, i + 1),
                ));
            }
        }
    }

    let categories = categories_delimiter.map(|_| categories);
    Ok(DesignStructureMatrix::new(entities, categories, data)?)
}
