//! Bibliographic repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and keyword search over the `books` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save` has full-replace semantics for an existing ISBN.
//! - Publication dates persist as unix seconds and decode back losslessly.

use crate::model::book::Book;
use crate::model::dates::CivilDate;
use crate::repo::RepoResult;
use rusqlite::{params, Connection, Row};

const BOOK_SELECT_SQL: &str = "SELECT
    isbn,
    title,
    subtitle,
    author,
    publisher,
    published,
    pages,
    description,
    website
FROM books";

/// Repository interface for bibliographic records.
pub trait BookRepository {
    fn exists(&self, isbn: &str) -> RepoResult<bool>;
    fn find_by_isbn(&self, isbn: &str) -> RepoResult<Option<Book>>;
    fn find_all(&self) -> RepoResult<Vec<Book>>;
    fn search_by_description(&self, keyword: &str) -> RepoResult<Vec<Book>>;
    fn save(&self, book: &Book) -> RepoResult<()>;
    fn delete_by_isbn(&self, isbn: &str) -> RepoResult<bool>;
}

/// SQLite-backed bibliographic repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn exists(&self, isbn: &str) -> RepoResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM books WHERE isbn = ?1;",
            [isbn],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn find_by_isbn(&self, isbn: &str) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE isbn = ?1;"))?;
        let mut rows = stmt.query([isbn])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY isbn ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn search_by_description(&self, keyword: &str) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL}
             WHERE LOWER(description) LIKE '%' || LOWER(?1) || '%'
             ORDER BY isbn ASC;"
        ))?;
        let mut rows = stmt.query([keyword])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn save(&self, book: &Book) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO books (
                isbn,
                title,
                subtitle,
                author,
                publisher,
                published,
                pages,
                description,
                website
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(isbn) DO UPDATE SET
                title = excluded.title,
                subtitle = excluded.subtitle,
                author = excluded.author,
                publisher = excluded.publisher,
                published = excluded.published,
                pages = excluded.pages,
                description = excluded.description,
                website = excluded.website;",
            params![
                book.isbn.as_str(),
                book.title.as_str(),
                book.subtitle.as_deref(),
                book.author.as_str(),
                book.publisher.as_deref(),
                book.published.map(CivilDate::to_unix_seconds),
                book.pages,
                book.description.as_str(),
                book.website.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn delete_by_isbn(&self, isbn: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE isbn = ?1;", [isbn])?;
        Ok(changed > 0)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    Ok(Book {
        isbn: row.get("isbn")?,
        title: row.get("title")?,
        subtitle: row.get("subtitle")?,
        author: row.get("author")?,
        publisher: row.get("publisher")?,
        published: row
            .get::<_, Option<i64>>("published")?
            .map(CivilDate::from_unix_seconds),
        pages: row.get("pages")?,
        description: row.get("description")?,
        website: row.get("website")?,
    })
}
