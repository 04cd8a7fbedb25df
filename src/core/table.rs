//! Plain-text table rendering for candidate lists.
//!
//! Candidates are shown with a 0-based `Index` column that feeds the
//! interactive selector; the index-less variant is used by the `official`
//! listing commands.

use crate::core::cache::RepositoryRecord;
use crate::core::registry::PackageHit;
use colored::*;

/// Prints repository candidates with a selection index column.
pub fn print_repository_candidates(repositories: &[RepositoryRecord]) {
    let rows: Vec<Vec<String>> = repositories
        .iter()
        .enumerate()
        .map(|(index, repo)| {
            vec![
                index.to_string(),
                repo.name.clone(),
                repo.organization.clone(),
                repo.url.clone(),
            ]
        })
        .collect();

    render(&["Index", "Name", "Organization", "Repository URL"], &rows);
}

/// Prints package candidates with a selection index column.
pub fn print_package_candidates(packages: &[PackageHit]) {
    let rows: Vec<Vec<String>> = packages
        .iter()
        .enumerate()
        .map(|(index, package)| {
            vec![
                index.to_string(),
                package.name.clone(),
                package.repository.url.clone(),
            ]
        })
        .collect();

    render(&["Index", "Name", "Repository URL"], &rows);
}

/// Prints the cached repository list without selection indices.
pub fn print_repository_list(repositories: &[RepositoryRecord]) {
    let rows: Vec<Vec<String>> = repositories
        .iter()
        .map(|repo| {
            vec![
                repo.name.clone(),
                repo.organization.clone(),
                repo.url.clone(),
            ]
        })
        .collect();

    render(&["Name", "Organization", "Repository URL"], &rows);
}

fn render(headers: &[&str], rows: &[Vec<String>]) {
    let widths = column_widths(headers, rows);

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| format!("{header:<width$}"))
        .collect();
    println!("{}", header_line.join("  ").blue());

    let rule: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    println!("{}", "-".repeat(rule).bright_black());

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        println!("{}", cells.join("  ").white());
    }
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (cell, width) in row.iter().zip(widths.iter_mut()) {
            *width = (*width).max(cell.len());
        }
    }
    widths
}
