pub(super) const INSERT_USER: &str = r#"
    INSERT INTO users (id, username, created_at)
    VALUES (?1, ?2, ?3)
"#;

pub(super) const SELECT_USER_BY_ID: &str = r#"
    SELECT id, username, created_at
    FROM users
    WHERE id = ?1
"#;

pub(super) const INSERT_POST: &str = r#"
    INSERT INTO posts (id, author_id, content, created_at)
    VALUES (?1, ?2, ?3, ?4)
"#;

pub(super) const SELECT_POST_BY_ID: &str = r#"
    SELECT id, author_id, content, created_at
    FROM posts
    WHERE id = ?1
"#;

pub(super) const SELECT_POSTS_WITH_COUNTS: &str = r#"
    SELECT p.id,
           p.author_id,
           u.username AS author_username,
           p.content,
           p.created_at,
           (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count
    FROM posts p
    JOIN users u ON u.id = p.author_id
    ORDER BY p.created_at DESC, p.id ASC
"#;

pub(super) const INSERT_COMMENT: &str = r#"
    INSERT INTO comments (id, post_id, author_id, parent_id, content, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub(super) const SELECT_COMMENT_BY_ID: &str = r#"
    SELECT id, post_id, author_id, parent_id, content, created_at
    FROM comments
    WHERE id = ?1
"#;

pub(super) const SELECT_POST_AUTHOR: &str = r#"
    SELECT author_id
    FROM posts
    WHERE id = ?1
"#;

pub(super) const SELECT_COMMENT_AUTHOR: &str = r#"
    SELECT author_id
    FROM comments
    WHERE id = ?1
"#;

pub(super) const SELECT_LIKE_FOR_POST: &str = r#"
    SELECT id, user_id, post_id, comment_id, created_at
    FROM likes
    WHERE user_id = ?1 AND post_id = ?2
"#;

pub(super) const SELECT_LIKE_FOR_COMMENT: &str = r#"
    SELECT id, user_id, post_id, comment_id, created_at
    FROM likes
    WHERE user_id = ?1 AND comment_id = ?2
"#;

pub(super) const INSERT_LIKE: &str = r#"
    INSERT INTO likes (id, user_id, post_id, comment_id, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub(super) const DELETE_LIKE_BY_ID: &str = r#"
    DELETE FROM likes
    WHERE id = ?1
"#;

pub(super) const COUNT_LIKES_FOR_POST: &str = r#"
    SELECT COUNT(*)
    FROM likes
    WHERE post_id = ?1
"#;

pub(super) const COUNT_LIKES_FOR_COMMENT: &str = r#"
    SELECT COUNT(*)
    FROM likes
    WHERE comment_id = ?1
"#;

pub(super) const INSERT_KARMA_TRANSACTION: &str = r#"
    INSERT INTO karma_transactions (id, user_id, amount, source_like_id, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub(super) const DELETE_KARMA_BY_SOURCE_LIKE: &str = r#"
    DELETE FROM karma_transactions
    WHERE source_like_id = ?1
"#;

pub(super) const SELECT_KARMA_BY_SOURCE_LIKE: &str = r#"
    SELECT id, user_id, amount, source_like_id, created_at
    FROM karma_transactions
    WHERE source_like_id = ?1
"#;

pub(super) const SUM_KARMA_FOR_USER_IN_WINDOW: &str = r#"
    SELECT COALESCE(SUM(amount), 0)
    FROM karma_transactions
    WHERE user_id = ?1 AND created_at >= ?2 AND created_at <= ?3
"#;

pub(super) const SELECT_KARMA_TOTALS_IN_WINDOW: &str = r#"
    SELECT k.user_id,
           u.username,
           SUM(k.amount) AS amount
    FROM karma_transactions k
    JOIN users u ON u.id = k.user_id
    WHERE k.created_at >= ?1 AND k.created_at <= ?2
    GROUP BY k.user_id, u.username
"#;
