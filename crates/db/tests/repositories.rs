//! Integration tests for the article, user, session, dashboard and ad
//! repositories, including the two stored procedures.

use chrono::{Duration, NaiveDate, Utc};
use newsdesk_core::article::ArticleFields;
use newsdesk_core::content::ListKind;
use newsdesk_core::users::email_search_pattern;
use newsdesk_db::models::ad::{CreateAd, UpdateAd};
use newsdesk_db::models::user::CreateUser;
use newsdesk_db::repositories::{AdRepo, ArticleRepo, DashboardRepo, SessionRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fields(title: &str) -> ArticleFields {
    ArticleFields {
        title: title.to_string(),
        excerpt: "Excerpt".to_string(),
        content: "<p>Body</p>".to_string(),
        image_url: vec!["https://cdn.example.com/1.jpg".to_string()],
        category: "Ciencia".to_string(),
        author_name: "Desk".to_string(),
        read_time: "4 min".to_string(),
        video_url: None,
    }
}

fn new_user(email: &str, is_admin: bool) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        is_admin,
    }
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn article_create_update_delete(pool: PgPool) {
    let author = UserRepo::create(&pool, &new_user("ed@news.example", false))
        .await
        .unwrap();
    let article = ArticleRepo::create(&pool, &fields("Draft"), Some(author.id))
        .await
        .unwrap();
    assert_eq!(article.image_url.len(), 1);

    let mut changed = fields("Final");
    changed.image_url.clear();
    let updated = ArticleRepo::update(&pool, article.id, &changed)
        .await
        .unwrap()
        .expect("article exists");
    assert_eq!(updated.title, "Final");
    assert!(updated.image_url.is_empty());
    assert_eq!(updated.author_id, Some(author.id));
    assert_eq!(updated.created_at, article.created_at);

    assert!(ArticleRepo::delete(&pool, article.id).await.unwrap());
    assert!(!ArticleRepo::delete(&pool, article.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_article_returns_none(pool: PgPool) {
    let result = ArticleRepo::update(&pool, uuid::Uuid::new_v4(), &fields("Ghost"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn existing_ids_filters_unknown_articles(pool: PgPool) {
    let kept = ArticleRepo::create(&pool, &fields("Kept"), None).await.unwrap();
    let unknown = uuid::Uuid::new_v4();

    let found = ArticleRepo::existing_ids(&pool, &[kept.id, unknown]).await.unwrap();
    assert_eq!(found, vec![kept.id]);
    assert!(ArticleRepo::existing_ids(&pool, &[]).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn increment_views_creates_then_increments(pool: PgPool) {
    let article = ArticleRepo::create(&pool, &fields("Popular"), None).await.unwrap();
    assert_eq!(ArticleRepo::views(&pool, article.id).await.unwrap(), 0);

    ArticleRepo::increment_views(&pool, article.id).await.unwrap();
    ArticleRepo::increment_views(&pool, article.id).await.unwrap();
    assert_eq!(ArticleRepo::views(&pool, article.id).await.unwrap(), 2);

    let listed = ArticleRepo::list_with_meta(&pool).await.unwrap();
    assert_eq!(listed[0].views, 2);
    assert!(listed[0].author_email.is_none());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_is_case_insensitive_and_limited(pool: PgPool) {
    for i in 0..12 {
        UserRepo::create(&pool, &new_user(&format!("Reporter{i}@news.example"), false))
            .await
            .unwrap();
    }
    UserRepo::create(&pool, &new_user("other@elsewhere.example", false))
        .await
        .unwrap();

    let hits = UserRepo::search_by_email(&pool, &email_search_pattern("reporter"), 10)
        .await
        .unwrap();
    assert_eq!(hits.len(), 10);
    assert!(hits.iter().all(|u| u.email.starts_with("Reporter")));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_treats_wildcards_literally(pool: PgPool) {
    UserRepo::create(&pool, &new_user("plain@news.example", false))
        .await
        .unwrap();
    let hits = UserRepo::search_by_email(&pool, &email_search_pattern("%%%"), 10)
        .await
        .unwrap();
    assert!(hits.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_admin_status_procedure(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("staff@news.example", false))
        .await
        .unwrap();

    UserRepo::set_admin_status(&pool, user.id, true).await.unwrap();
    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(reloaded.is_admin);

    UserRepo::set_admin_status(&pool, user.id, false).await.unwrap();
    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(!reloaded.is_admin);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn revoked_and_expired_sessions_are_not_live(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("s@news.example", false))
        .await
        .unwrap();

    let live = SessionRepo::create(&pool, user.id, Utc::now() + Duration::hours(1))
        .await
        .unwrap();
    assert!(SessionRepo::find_live(&pool, live.id).await.unwrap().is_some());

    assert!(SessionRepo::revoke(&pool, live.id).await.unwrap());
    assert!(!SessionRepo::revoke(&pool, live.id).await.unwrap());
    assert!(SessionRepo::find_live(&pool, live.id).await.unwrap().is_none());

    let expired = SessionRepo::create(&pool, user.id, Utc::now() - Duration::minutes(1))
        .await
        .unwrap();
    assert!(SessionRepo::find_live(&pool, expired.id).await.unwrap().is_none());

    assert_eq!(SessionRepo::cleanup_expired(&pool).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_counters(pool: PgPool) {
    let author = UserRepo::create(&pool, &new_user("a@news.example", false))
        .await
        .unwrap();
    let mut ids = Vec::new();
    for (i, title) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
        let author_id = (i % 2 == 0).then_some(author.id);
        let article = ArticleRepo::create(&pool, &fields(title), author_id)
            .await
            .unwrap();
        for _ in 0..=i {
            ArticleRepo::increment_views(&pool, article.id).await.unwrap();
        }
        ids.push(article.id);
    }

    assert_eq!(DashboardRepo::count_articles(&pool).await.unwrap(), 6);
    assert_eq!(DashboardRepo::count_articles_with_author(&pool).await.unwrap(), 3);
    assert_eq!(
        DashboardRepo::count_active(&pool, ListKind::Ticker).await.unwrap(),
        0
    );
    // 1 + 2 + ... + 6, over every article rather than the top five.
    assert_eq!(DashboardRepo::total_views(&pool).await.unwrap(), 21);

    let top = DashboardRepo::top_viewed(&pool, 5).await.unwrap();
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].title, "F");
    assert_eq!(top[0].views, 6);
    assert_eq!(top[4].title, "B");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn total_views_is_zero_without_metrics(pool: PgPool) {
    assert_eq!(DashboardRepo::total_views(&pool).await.unwrap(), 0);
    assert!(DashboardRepo::top_viewed(&pool, 5).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Ads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn ad_defaults_and_partial_update(pool: PgPool) {
    let ad = AdRepo::create(
        &pool,
        &CreateAd {
            title: "Spring sale".to_string(),
            image_url: "https://cdn.example.com/ad.png".to_string(),
            link_url: "https://shop.example.com".to_string(),
            position: "side".to_string(),
            active: None,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();
    assert!(ad.active);
    assert_eq!((ad.end_date - ad.start_date).num_days(), 30);

    let end = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap();
    let updated = AdRepo::update(
        &pool,
        ad.id,
        &UpdateAd {
            active: Some(false),
            end_date: Some(end),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(!updated.active);
    assert_eq!(updated.end_date, end);
    assert_eq!(updated.title, "Spring sale");

    assert_eq!(AdRepo::list(&pool).await.unwrap().len(), 1);
    assert!(AdRepo::delete(&pool, ad.id).await.unwrap());
    assert!(AdRepo::find_by_id(&pool, ad.id).await.unwrap().is_none());
}
