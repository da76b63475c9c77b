use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::{Duration, NaiveDate, Utc};
use rand::{seq::SliceRandom, Rng};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::collections::HashSet;
use uuid::Uuid;

use crate::entities::{booking, listing, review, user};
use crate::error::{AppError, AppResult};
use crate::store;

const NUM_USERS: usize = 5;
const NUM_LISTINGS: usize = 10;
const BOOKINGS_PER_LISTING: usize = 3;
const REVIEWS_PER_LISTING: usize = 4;

const SEED_USER_PREFIX: &str = "seed_user_";
const DEFAULT_PASSWORD: &str = "password";

const COUNTRIES: [&str; 6] = ["USA", "Canada", "UK", "Australia", "Germany", "France"];
const CITIES: [&str; 6] = ["New York", "Toronto", "London", "Sydney", "Berlin", "Paris"];
const LISTING_TITLES: [&str; 6] = [
    "Cozy Downtown Loft",
    "Sunny Beachfront Villa",
    "Rustic Mountain Cabin",
    "Modern City Apartment",
    "Charming Cottage by the Lake",
    "Executive Studio",
];
const REVIEW_COMMENTS: [Option<&str>; 4] = [
    Some("Fantastic stay! Highly recommend."),
    Some("Clean and comfortable."),
    Some("Great value for money."),
    None,
];

/// Populate the store with randomized sample data. Existing sample rows are
/// cleared first; users outside the seed prefix are left alone.
pub async fn run(db: &DatabaseConnection) -> AppResult<()> {
    tracing::info!("Starting database seeding");

    clear_sample_data(db).await?;

    let users = create_users(db).await?;
    let listings = create_listings(db, &users).await?;
    create_bookings(db, &users, &listings).await?;
    create_reviews(db, &users, &listings).await?;

    tracing::info!("Database seeding complete");
    Ok(())
}

/// Children before parents; non-seed users are protected by the prefix filter.
async fn clear_sample_data(db: &DatabaseConnection) -> AppResult<()> {
    review::Entity::delete_many().exec(db).await?;
    booking::Entity::delete_many().exec(db).await?;
    listing::Entity::delete_many().exec(db).await?;
    user::Entity::delete_many()
        .filter(user::Column::Username.starts_with(SEED_USER_PREFIX))
        .exec(db)
        .await?;

    tracing::info!("Existing sample data cleared");
    Ok(())
}

/// Idempotent: an existing user with a matching name is reused, and only a
/// freshly created one gets the default password.
async fn create_users(db: &DatabaseConnection) -> AppResult<Vec<user::Model>> {
    tracing::info!("Creating {} sample users", NUM_USERS);

    let mut users = Vec::with_capacity(NUM_USERS);
    for i in 1..=NUM_USERS {
        let username = seed_username(i);

        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(&username))
            .one(db)
            .await?;

        let user = match existing {
            Some(user) => user,
            None => {
                let salt = SaltString::generate(&mut OsRng);
                let password_hash = Argon2::default()
                    .hash_password(DEFAULT_PASSWORD.as_bytes(), &salt)
                    .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?
                    .to_string();

                user::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    username: Set(username),
                    email: Set(format!("user{}@example.com", i)),
                    password_hash: Set(password_hash),
                    ..Default::default()
                }
                .insert(db)
                .await?
            }
        };

        users.push(user);
    }

    tracing::info!("Users created");
    Ok(users)
}

async fn create_listings(
    db: &DatabaseConnection,
    users: &[user::Model],
) -> AppResult<Vec<listing::Model>> {
    tracing::info!("Creating {} sample listings", NUM_LISTINGS);

    let mut listings = Vec::with_capacity(NUM_LISTINGS);
    for i in 1..=NUM_LISTINGS {
        let new = {
            let mut rng = rand::thread_rng();
            let host = users.choose(&mut rng).expect("seed users present");
            let title = format!(
                "{} #{}",
                LISTING_TITLES[rng.gen_range(0..LISTING_TITLES.len())],
                i
            );
            let country = COUNTRIES[rng.gen_range(0..COUNTRIES.len())];
            let city = CITIES[rng.gen_range(0..CITIES.len())];

            store::listings::NewListing {
                host_id: host.id,
                description: format!(
                    "Description for {}. A beautiful place in {}, {}.",
                    title, city, country
                ),
                title,
                price_per_night: random_price(&mut rng),
                is_published: true,
                country: country.to_string(),
                city: city.to_string(),
                address: format!("{} Sample St.", rng.gen_range(100..=999)),
            }
        };

        listings.push(store::listings::create(db, new).await?);
    }

    tracing::info!("Listings created");
    Ok(listings)
}

async fn create_bookings(
    db: &DatabaseConnection,
    users: &[user::Model],
    listings: &[listing::Model],
) -> AppResult<()> {
    tracing::info!("Creating sample bookings");

    let today = Utc::now().date_naive();
    let mut created = 0;

    for listing in listings {
        for _ in 0..BOOKINGS_PER_LISTING {
            let new = {
                let mut rng = rand::thread_rng();
                let guest = users.choose(&mut rng).expect("seed users present");
                if guest.id == listing.host_id {
                    continue;
                }

                let nights: i64 = rng.gen_range(2..=7);
                let (start_date, end_date) = stay_dates(today, rng.gen_range(1..=30), nights);

                store::bookings::NewBooking {
                    listing_id: listing.id,
                    guest_id: guest.id,
                    start_date,
                    end_date,
                    total_price: total_price(listing.price_per_night, nights),
                    is_paid: rng.gen_bool(0.5),
                }
            };

            match store::bookings::create(db, new).await {
                Ok(_) => created += 1,
                Err(AppError::Integrity(_)) => continue,
                Err(err) => return Err(err),
            }
        }
    }

    tracing::info!("Bookings created: {}", created);
    Ok(())
}

async fn create_reviews(
    db: &DatabaseConnection,
    users: &[user::Model],
    listings: &[listing::Model],
) -> AppResult<()> {
    tracing::info!("Creating sample reviews");

    let mut created = 0;

    for listing in listings {
        let already_reviewed: HashSet<Uuid> = review::Entity::find()
            .filter(review::Column::ListingId.eq(listing.id))
            .all(db)
            .await?
            .into_iter()
            .map(|r| r.reviewer_id)
            .collect();

        let potential: Vec<&user::Model> = users
            .iter()
            .filter(|u| u.id != listing.host_id && !already_reviewed.contains(&u.id))
            .collect();

        let sampled: Vec<(Uuid, i32, Option<String>)> = {
            let mut rng = rand::thread_rng();
            let chosen: Vec<Uuid> = potential
                .choose_multiple(&mut rng, REVIEWS_PER_LISTING)
                .map(|u| u.id)
                .collect();
            chosen
                .into_iter()
                .map(|reviewer_id| {
                    (
                        reviewer_id,
                        rng.gen_range(1..=5),
                        REVIEW_COMMENTS[rng.gen_range(0..REVIEW_COMMENTS.len())]
                            .map(str::to_string),
                    )
                })
                .collect()
        };

        for (reviewer_id, rating, comment) in sampled {
            let new = store::reviews::NewReview {
                listing_id: listing.id,
                reviewer_id,
                rating,
                comment,
            };

            match store::reviews::create(db, new).await {
                Ok(_) => created += 1,
                Err(AppError::Integrity(_)) => continue,
                Err(err) => return Err(err),
            }
        }
    }

    tracing::info!("Reviews created: {}", created);
    Ok(())
}

fn seed_username(i: usize) -> String {
    format!("{}{}", SEED_USER_PREFIX, i)
}

fn random_price(rng: &mut impl Rng) -> Decimal {
    // uniform over cents in [50.00, 300.00]
    Decimal::new(rng.gen_range(5000..=30000), 2)
}

fn stay_dates(today: NaiveDate, start_offset: i64, nights: i64) -> (NaiveDate, NaiveDate) {
    let start = today + Duration::days(start_offset);
    let end = start + Duration::days(nights);
    (start, end)
}

fn total_price(price_per_night: Decimal, nights: i64) -> Decimal {
    price_per_night * Decimal::from(nights)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn stay_dates_are_well_ordered_over_sampled_ranges() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        for offset in 1..=30 {
            for nights in 2..=7 {
                let (start, end) = stay_dates(today, offset, nights);
                assert!(start < end);
                assert!(start > today);
            }
        }
    }

    #[test]
    fn sampled_prices_stay_in_catalog_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let price = random_price(&mut rng);
            assert!(price >= Decimal::from(50));
            assert!(price <= Decimal::from(300));
            assert!(price.scale() <= 2);
        }
    }

    #[test]
    fn total_price_is_nightly_price_times_nights() {
        let nightly = Decimal::new(15000, 2);
        assert_eq!(total_price(nightly, 7), Decimal::new(105000, 2));
    }

    #[test]
    fn comment_catalog_includes_the_no_comment_option() {
        assert!(REVIEW_COMMENTS.contains(&None));
    }

    #[test]
    fn seed_usernames_carry_the_reserved_prefix() {
        for i in 1..=NUM_USERS {
            assert!(seed_username(i).starts_with(SEED_USER_PREFIX));
        }
    }
}
