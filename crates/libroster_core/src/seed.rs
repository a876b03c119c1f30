//! Deterministic starter data for the two record families.
//!
//! # Responsibility
//! - Provide a small, valid seed catalog and squad for local runs and
//!   smoke checks, inserted through the regular repository contracts.
//!
//! # Invariants
//! - Seeding is idempotent: books upsert by ISBN, players skip squad
//!   numbers that are already taken.

use crate::model::book::Book;
use crate::model::dates::CivilDate;
use crate::model::player::Player;
use crate::repo::book_repo::BookRepository;
use crate::repo::player_repo::{PlayerRepository, SaveOutcome};
use crate::repo::RepoResult;

/// Inserts the starter catalog. Returns the number of rows written.
pub fn seed_books<R: BookRepository>(repo: &R) -> RepoResult<usize> {
    let books = starter_books();
    for book in &books {
        repo.save(book)?;
    }
    Ok(books.len())
}

/// Inserts the starter squad. Returns the number of rows inserted; squad
/// numbers already present in the store are skipped.
pub fn seed_players<R: PlayerRepository>(repo: &R) -> RepoResult<usize> {
    let mut inserted = 0;
    for player in starter_players() {
        if let SaveOutcome::Saved(_) = repo.insert(&player)? {
            inserted += 1;
        }
    }
    Ok(inserted)
}

fn date(iso: &str) -> Option<CivilDate> {
    CivilDate::parse_iso(iso)
}

fn starter_books() -> Vec<Book> {
    vec![
        Book {
            isbn: "9781484200773".to_string(),
            title: "Pro Git".to_string(),
            subtitle: Some("Everything you need to know about Git".to_string()),
            author: "Scott Chacon and Ben Straub".to_string(),
            publisher: Some("Apress".to_string()),
            published: date("2014-11-18"),
            pages: 458,
            description: "Pro Git (Second Edition) is your fully-updated guide to Git \
                          and its usage in the modern world."
                .to_string(),
            website: Some("https://git-scm.com/book/en/v2".to_string()),
        },
        Book {
            isbn: "9781838986698".to_string(),
            title: "The Java Workshop".to_string(),
            subtitle: Some(
                "Learn object-oriented programming and kickstart your career in software \
                 development"
                    .to_string(),
            ),
            author: "David Cuartielles, Andreas Göransson, Eric Foster-Johnson".to_string(),
            publisher: Some("Packt Publishing".to_string()),
            published: date("2019-10-31"),
            pages: 606,
            description: "A practical, hands-on introduction to productive Java development, \
                          from collections and object orientation to testing and lambdas."
                .to_string(),
            website: Some(
                "https://www.packtpub.com/free-ebook/the-java-workshop/9781838986698".to_string(),
            ),
        },
        Book {
            isbn: "9781789613476".to_string(),
            title: "Hands-On Microservices with Spring Boot and Spring Cloud".to_string(),
            subtitle: Some(
                "Build and deploy Java microservices using Spring Cloud, Istio, and Kubernetes"
                    .to_string(),
            ),
            author: "Magnus Larsson".to_string(),
            publisher: Some("Packt Publishing".to_string()),
            published: date("2019-09-20"),
            pages: 668,
            description: "A guide to building production-ready, cloud-native microservice \
                          landscapes and operating them at scale."
                .to_string(),
            website: None,
        },
    ]
}

fn starter_players() -> Vec<Player> {
    let player = |first: &str, middle: Option<&str>, last: &str, born: &str, squad: i64,
                  position: &str, abbr: &str, team: &str, league: &str, starting: bool| {
        Player {
            id: None,
            first_name: first.to_string(),
            middle_name: middle.map(ToString::to_string),
            last_name: last.to_string(),
            date_of_birth: date(born),
            squad_number: squad,
            position: position.to_string(),
            abbr_position: Some(abbr.to_string()),
            team: team.to_string(),
            league: Some(league.to_string()),
            starting11: starting,
        }
    };

    vec![
        player(
            "Damián", Some("Emiliano"), "Martínez", "1992-09-02", 23,
            "Goalkeeper", "GK", "Aston Villa", "Premier League", true,
        ),
        player(
            "Rodrigo", Some("Javier"), "De Paul", "1994-05-24", 7,
            "Central Midfielder", "CM", "Atlético Madrid", "La Liga", true,
        ),
        player(
            "Julián", None, "Álvarez", "2000-01-31", 9,
            "Centre Forward", "CF", "Manchester City", "Premier League", true,
        ),
        player(
            "Lionel", Some("Andrés"), "Messi", "1987-06-24", 10,
            "Right Winger", "RW", "Inter Miami CF", "Major League Soccer", true,
        ),
    ]
}
