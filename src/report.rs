//! Plain-text rendering of the analytical queries for the terminal.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::analytics::{Analytics, AverageSalary, CompanyVacancyCount, VacancyListing};
use crate::error::AppError;

/// Run every query and write the report to `out`. A failed query is logged
/// and reported as a "no data" line; the rest of the report still runs.
pub async fn write_report<W: Write>(
    out: &mut W,
    analytics: &Analytics,
    keywords: &[String],
) -> io::Result<()> {
    writeln!(out, "\nVACANCY COUNT BY COMPANY\n")?;
    let section = render(
        analytics.companies_and_vacancy_counts().await,
        render_company_counts,
        "No companies found",
    );
    out.write_all(section.as_bytes())?;

    writeln!(out, "\nALL VACANCIES\n")?;
    let section = render(
        analytics.all_vacancies().await,
        render_listings,
        "No vacancies found",
    );
    out.write_all(section.as_bytes())?;

    writeln!(out, "\nAVERAGE SALARY BY VACANCY\n")?;
    let section = render(
        analytics.average_salary_by_vacancy_name().await,
        render_average_salaries,
        "No average salaries found",
    );
    out.write_all(section.as_bytes())?;

    writeln!(out, "\nVACANCIES ABOVE AVERAGE SALARY\n")?;
    let section = render(
        analytics.vacancies_above_average_salary().await,
        render_listings,
        "No vacancies above the average salary",
    );
    out.write_all(section.as_bytes())?;

    for keyword in keywords {
        writeln!(out, "\nVACANCIES MATCHING '{keyword}'\n")?;
        let section = render(
            analytics.vacancies_matching_keyword(keyword).await,
            render_listings,
            "No vacancies match this keyword",
        );
        out.write_all(section.as_bytes())?;
    }

    out.flush()
}

fn render<T>(
    result: Result<Vec<T>, AppError>,
    render_rows: fn(&[T]) -> String,
    empty_message: &str,
) -> String {
    match result {
        Ok(rows) if rows.is_empty() => format!("{empty_message}\n"),
        Ok(rows) => render_rows(&rows),
        Err(e) => {
            tracing::error!("{e}");
            format!("{empty_message} (query failed, see log)\n")
        }
    }
}

pub fn render_company_counts(rows: &[CompanyVacancyCount]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "Company:    {}", row.employer_name);
        let _ = writeln!(out, "Vacancies:  {}\n", row.vacancy_count);
    }
    out
}

pub fn render_listings(rows: &[VacancyListing]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "City:       {}", or_dash(row.city.as_deref()));
        let _ = writeln!(out, "Company:    {}", row.employer_name);
        let _ = writeln!(out, "Vacancy:    {}", or_dash(row.vacancy_name.as_deref()));
        let _ = writeln!(out, "Salary:     {}", format_salary(row.salary));
        let _ = writeln!(out, "Link:       {}\n", or_dash(row.vacancy_url.as_deref()));
    }
    out
}

pub fn render_average_salaries(rows: &[AverageSalary]) -> String {
    let mut out = String::new();
    for row in rows {
        let average = match row.average_salary {
            Some(avg) => format!("{avg:.2} RUB"),
            None => "not specified".to_string(),
        };
        let _ = writeln!(out, "Vacancy:        {}", or_dash(row.vacancy_name.as_deref()));
        let _ = writeln!(out, "Average salary: {average}\n");
    }
    out
}

fn format_salary(salary: Option<i32>) -> String {
    match salary {
        Some(amount) => format!("{amount} RUB"),
        None => "not specified".to_string(),
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
