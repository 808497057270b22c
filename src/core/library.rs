//! Community library business logic - Shared reading material.
//!
//! Books are uploaded as external links and listed newest first. The
//! download counter is incremented with a single database-level
//! `downloads = downloads + 1` update so concurrent readers cannot lose
//! counts to a read-modify-write race.

use crate::{
    core::model::BookCategory,
    entities::{LibraryBook, library_book},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};

/// Content language of a library book.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BookLanguage {
    Sinhala,
    Tamil,
    English,
}

impl BookLanguage {
    /// The persisted string form of this language.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sinhala => "Sinhala",
            Self::Tamil => "Tamil",
            Self::English => "English",
        }
    }
}

/// Input for [`save_library_book`].
#[derive(Clone, Debug)]
pub struct NewLibraryBook {
    /// Client-generated id
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: BookCategory,
    pub description: String,
    pub language: BookLanguage,
    pub link_url: String,
    pub cover_url: Option<String>,
    pub uploaded_by: String,
}

/// Saves a library book, replacing an existing one with the same id.
///
/// Title, author, and link are required; the download counter starts at
/// zero and is preserved only through [`increment_downloads`].
pub async fn save_library_book(
    db: &DatabaseConnection,
    new: NewLibraryBook,
) -> Result<library_book::Model> {
    if new.title.trim().is_empty() || new.author.trim().is_empty() || new.link_url.trim().is_empty()
    {
        return Err(Error::Config {
            message: "Library books need a title, an author, and a link".to_string(),
        });
    }

    let model = library_book::ActiveModel {
        id: Set(new.id.trim().to_string()),
        title: Set(new.title.trim().to_string()),
        author: Set(new.author.trim().to_string()),
        category: Set(new.category.as_str().to_string()),
        description: Set(new.description),
        language: Set(new.language.as_str().to_string()),
        link_url: Set(new.link_url.trim().to_string()),
        cover_url: Set(new.cover_url),
        uploaded_by: Set(new.uploaded_by),
        downloads: Set(0),
        timestamp: Set(Utc::now()),
    };

    LibraryBook::insert(model)
        .on_conflict(
            OnConflict::column(library_book::Column::Id)
                .update_columns([
                    library_book::Column::Title,
                    library_book::Column::Author,
                    library_book::Column::Category,
                    library_book::Column::Description,
                    library_book::Column::Language,
                    library_book::Column::LinkUrl,
                    library_book::Column::CoverUrl,
                    library_book::Column::UploadedBy,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    LibraryBook::find_by_id(new.id.trim().to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::BookNotFound {
            id: new.id.trim().to_string(),
        })
}

/// Retrieves all library books, newest first.
pub async fn get_all_library_books(db: &DatabaseConnection) -> Result<Vec<library_book::Model>> {
    LibraryBook::find()
        .order_by_desc(library_book::Column::Timestamp)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Atomically increments a book's download counter.
pub async fn increment_downloads(
    db: &DatabaseConnection,
    book_id: &str,
) -> Result<library_book::Model> {
    use sea_orm::sea_query::Expr;

    // First verify the book exists
    LibraryBook::find_by_id(book_id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| Error::BookNotFound {
            id: book_id.to_string(),
        })?;

    LibraryBook::update_many()
        .col_expr(
            library_book::Column::Downloads,
            Expr::col(library_book::Column::Downloads).add(1),
        )
        .filter(library_book::Column::Id.eq(book_id))
        .exec(db)
        .await?;

    LibraryBook::find_by_id(book_id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| Error::BookNotFound {
            id: book_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn test_book(id: &str) -> NewLibraryBook {
        NewLibraryBook {
            id: id.to_string(),
            title: "Madol Doova".to_string(),
            author: "Martin Wickramasinghe".to_string(),
            category: BookCategory::Storybook,
            description: "Classic childhood adventure novel.".to_string(),
            language: BookLanguage::Sinhala,
            link_url: "https://example.org/madol-doova.pdf".to_string(),
            cover_url: None,
            uploaded_by: "Community User".to_string(),
        }
    }

    #[tokio::test]
    async fn save_and_list_books() -> Result<()> {
        let db = setup_test_db().await?;

        let saved = save_library_book(&db, test_book("book-001")).await?;
        assert_eq!(saved.downloads, 0);
        assert_eq!(saved.language, "Sinhala");

        let books = get_all_library_books(&db).await?;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Madol Doova");

        Ok(())
    }

    #[tokio::test]
    async fn download_counter_accumulates() -> Result<()> {
        let db = setup_test_db().await?;
        save_library_book(&db, test_book("book-001")).await?;

        increment_downloads(&db, "book-001").await?;
        let book = increment_downloads(&db, "book-001").await?;

        assert_eq!(book.downloads, 2);
        Ok(())
    }

    #[tokio::test]
    async fn incrementing_unknown_book_fails() -> Result<()> {
        let db = setup_test_db().await?;

        let result = increment_downloads(&db, "book-missing").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::BookNotFound { id } if id == "book-missing"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn book_input_is_validated() -> Result<()> {
        let db = setup_test_db().await?;

        let mut book = test_book("book-001");
        book.link_url = String::new();
        assert!(matches!(
            save_library_book(&db, book).await.unwrap_err(),
            Error::Config { .. }
        ));
        Ok(())
    }
}
