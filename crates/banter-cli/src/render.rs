//! Plain-text rendering of application state

use banter_client::{LeaderboardRow, Post};
use banter_feed::state::{AppState, StatusKind};
use banter_feed::thread::CommentRecord;
use banter_feed::Action;
use chrono::TimeZone;

/// Print whatever the just-reduced action made worth showing
pub fn after_action(action: &Action, state: &AppState) {
    match action {
        Action::FeedLoaded(Ok(_)) | Action::ToggleMineOnly => feed(state),
        Action::CommentsLoaded(post_id, Ok(_)) => thread(state, *post_id),
        Action::LeaderboardLoaded(Ok(_)) => board(state),
        Action::MyStandingLoaded(Ok(_)) => standing(state),
        _ => {}
    }
}

/// Print the current status line, if any
pub fn status(state: &AppState) {
    if let Some(line) = &state.status {
        match line.kind {
            StatusKind::Info => println!("* {}", line.message),
            StatusKind::Error => println!("! {}", line.message),
        }
    }
}

pub fn feed(state: &AppState) {
    let posts = state.visible_posts();
    if posts.is_empty() {
        println!("(no posts)");
        return;
    }
    let heading = if state.feed.mine_only {
        "Your posts"
    } else {
        "Feed"
    };
    println!("{}:", heading);
    for post in posts {
        println!("{}", format_post(post));
        if let Some(image) = &post.image {
            println!("      image: {}", image);
        }
    }
}

pub fn thread(state: &AppState, post_id: u64) {
    let Some(thread) = state.discussions.threads.get(&post_id) else {
        println!("(no comments loaded for post {})", post_id);
        return;
    };
    if thread.is_empty() {
        println!("(no comments on post {})", post_id);
        return;
    }
    println!("Comments on post {}:", post_id);
    for (record, depth) in thread.walk() {
        println!("{}", format_comment(record, depth));
    }
    if let Some(target) = state.discussions.reply_targets.active(post_id) {
        println!("(replying to comment {})", target);
    }
}

pub fn board(state: &AppState) {
    if state.board.rows.is_empty() {
        println!("No karma yet");
        return;
    }
    println!("Leaderboard:");
    for (index, row) in state.board.rows.iter().enumerate() {
        println!("{}", format_row(index + 1, row));
    }
}

pub fn standing(state: &AppState) {
    let Some(standing) = &state.board.my_standing else {
        println!("(standing not loaded)");
        return;
    };
    match standing.rank {
        Some(rank) => println!("You are ranked #{}", rank),
        None => println!("You have no rank yet"),
    }
    println!("Your karma: {}", standing.karma);
}

pub fn whoami(state: &AppState) {
    match &state.session.current {
        Some(view) => println!(
            "Signed in as {} (session expires {})",
            view.subject,
            format_expiry(view.expires_at_ms)
        ),
        None => println!("Not signed in"),
    }
}

fn format_post(post: &Post) -> String {
    format!(
        "#{:<4} [{}] {} ({} likes, {} comments)",
        post.id, post.user, post.content, post.like_count, post.comment_count
    )
}

fn format_comment(record: &CommentRecord, depth: usize) -> String {
    format!(
        "{}[{}] {}: {}",
        "  ".repeat(depth),
        record.id,
        record.author,
        record.content
    )
}

fn format_row(position: usize, row: &LeaderboardRow) -> String {
    format!("{:>3}. {} ({} karma)", position, row.username, row.karma)
}

fn format_expiry(expires_at_ms: i64) -> String {
    chrono::Local
        .timestamp_millis_opt(expires_at_ms)
        .single()
        .map(|stamp| stamp.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format!("at {} ms", expires_at_ms))
}
