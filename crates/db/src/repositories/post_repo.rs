//! Repository for the `posts` and `post_categories` tables.

use quill_core::post::PostStatus;
use quill_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::post::{CreatePost, Post, PostDetail, UpdatePost};

/// Column list for raw `posts` rows.
const COLUMNS: &str = "id, user_id, title, body, description, status, min_read, \
                        created_at, updated_at";

/// Projection shared by every query returning a [`PostDetail`].
const DETAIL_SELECT: &str = "SELECT p.id, p.title, p.user_id, u.username AS author, r.bio,
        ARRAY(
            SELECT c.name FROM post_categories pc
            INNER JOIN categories c ON c.id = pc.category_id
            WHERE pc.post_id = p.id
            ORDER BY c.name
        ) AS categories,
        p.status, p.min_read, p.description, p.body, p.created_at, p.updated_at
     FROM posts p
     LEFT JOIN users u ON u.id = p.user_id
     LEFT JOIN user_roles r ON r.user_id = p.user_id";

/// Most recently edited first.
const DETAIL_ORDER: &str = "ORDER BY p.updated_at DESC, p.created_at DESC, p.id DESC";

/// Provides CRUD operations for posts and their category links.
pub struct PostRepo;

impl PostRepo {
    /* ----------------------------------------------------------------------
    Writes
    ---------------------------------------------------------------------- */

    /// Insert a new post owned by `owner_id`, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        owner_id: DbId,
        input: &CreatePost,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (user_id, title, body, description, status, min_read)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(&input.min_read)
            .fetch_one(executor)
            .await
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                min_read = COALESCE($6, min_read)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.description)
            .bind(input.status.map(PostStatus::as_str))
            .bind(&input.min_read)
            .fetch_optional(executor)
            .await
    }

    /// Set a post's status unconditionally. Returns `None` if the post is missing.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: PostStatus,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET status = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a post and, by cascade, its comments, views, links and requests.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /* ----------------------------------------------------------------------
    Category links
    ---------------------------------------------------------------------- */

    /// Ids of the categories currently attached to a post.
    pub async fn category_ids(
        conn: &mut PgConnection,
        post_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT category_id FROM post_categories WHERE post_id = $1 ORDER BY category_id",
        )
        .bind(post_id)
        .fetch_all(conn)
        .await
    }

    /// Attach categories to a post, ignoring links that already exist.
    pub async fn attach_categories(
        conn: &mut PgConnection,
        post_id: DbId,
        category_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if category_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO post_categories (post_id, category_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT (post_id, category_id) DO NOTHING",
        )
        .bind(post_id)
        .bind(category_ids)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Detach categories from a post.
    pub async fn detach_categories(
        conn: &mut PgConnection,
        post_id: DbId,
        category_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if category_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "DELETE FROM post_categories WHERE post_id = $1 AND category_id = ANY($2)",
        )
        .bind(post_id)
        .bind(category_ids)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /* ----------------------------------------------------------------------
    Reads
    ---------------------------------------------------------------------- */

    /// Find a raw post row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether any post already has exactly this body.
    pub async fn body_exists(pool: &PgPool, body: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE body = $1)")
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Find a post with its author, bio and category names.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<PostDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every post regardless of status.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PostDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} {DETAIL_ORDER}");
        sqlx::query_as::<_, PostDetail>(&query).fetch_all(pool).await
    }

    /// Published posts only.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<PostDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE p.status = 'published' {DETAIL_ORDER}");
        sqlx::query_as::<_, PostDetail>(&query).fetch_all(pool).await
    }

    /// All posts owned by a user, any status.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<PostDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE p.user_id = $1 {DETAIL_ORDER}");
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Posts shown on a user's profile: their own published posts plus every
    /// post they hold an approved repost request for.
    pub async fn list_visible_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PostDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT}
             WHERE (p.user_id = $1 AND p.status = 'published')
                OR p.id IN (
                    SELECT rr.post_id FROM repost_requests rr
                    WHERE rr.requester_id = $1 AND rr.status = 'approved'
                )
             {DETAIL_ORDER}"
        );
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Published posts carrying a given category.
    pub async fn list_published_in_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<PostDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT}
             WHERE p.status = 'published'
               AND EXISTS (
                   SELECT 1 FROM post_categories pc
                   WHERE pc.post_id = p.id AND pc.category_id = $1
               )
             {DETAIL_ORDER}"
        );
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }
}
