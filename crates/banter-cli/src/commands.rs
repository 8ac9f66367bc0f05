//! Input line parsing
//!
//! One line, one command. Lines that map onto the store become
//! [`Command::Dispatch`]; pure reads (`help`, `whoami`) are answered
//! directly by the caller without touching the store.

use std::path::PathBuf;

use banter_feed::Action;

pub const HELP: &str = "\
Commands:
  login <username> <password>
  register <username> <password>
  logout
  whoami
  feed                          refresh and show the feed
  mine                          toggle the only-my-posts filter
  post <text>                   create a post
  post-image <path> [text]      create a post with an image
  comments <post id>            show a post's discussion
  comment <post id> <text>      add a comment (aimed at the reply target, if set)
  reply <post id> <comment id>  aim the next comment at an existing comment
  reply <post id>               back to top-level commenting
  like <post id>                toggle a like on a post
  board                         show the leaderboard
  me                            show your own standing
  quit";

#[derive(Debug, PartialEq)]
pub enum Command {
    Dispatch(Action),
    Help,
    WhoAmI,
    Usage(&'static str),
    Unknown(String),
}

/// Parse one input line into a command.
///
/// An empty line is a no-op action, so the event loop stays uniform.
pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Dispatch(Action::None);
    }

    let mut words = trimmed.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    match verb {
        "help" => Command::Help,
        "whoami" => Command::WhoAmI,
        "quit" | "exit" => Command::Dispatch(Action::Quit),
        "logout" => Command::Dispatch(Action::Logout),
        "feed" => Command::Dispatch(Action::FetchFeed),
        "mine" => Command::Dispatch(Action::ToggleMineOnly),
        "board" => Command::Dispatch(Action::FetchLeaderboard),
        "me" => Command::Dispatch(Action::FetchMyStanding),

        "login" => match args.as_slice() {
            [username, password] => Command::Dispatch(Action::Login {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Command::Usage("usage: login <username> <password>"),
        },

        "register" => match args.as_slice() {
            [username, password] => Command::Dispatch(Action::Register {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Command::Usage("usage: register <username> <password>"),
        },

        // Free text, so take the raw rest of the line
        "post" => Command::Dispatch(Action::SubmitPost {
            content: rest_after(trimmed, verb).to_string(),
            image: None,
        }),

        "post-image" => {
            let rest = rest_after(trimmed, verb);
            let mut parts = rest.splitn(2, char::is_whitespace);
            match parts.next().filter(|path| !path.is_empty()) {
                Some(path) => Command::Dispatch(Action::SubmitPost {
                    content: parts.next().unwrap_or("").trim_start().to_string(),
                    image: Some(PathBuf::from(path)),
                }),
                None => Command::Usage("usage: post-image <path> [text]"),
            }
        }

        "comments" => match one_id(&args) {
            Some(post_id) => Command::Dispatch(Action::FetchComments(post_id)),
            None => Command::Usage("usage: comments <post id>"),
        },

        "comment" => {
            let rest = rest_after(trimmed, verb);
            let mut parts = rest.splitn(2, char::is_whitespace);
            let post_id = parts.next().and_then(|id| id.parse::<u64>().ok());
            match (post_id, parts.next()) {
                (Some(post_id), Some(text)) => Command::Dispatch(Action::SubmitComment {
                    post_id,
                    content: text.trim_start().to_string(),
                }),
                _ => Command::Usage("usage: comment <post id> <text>"),
            }
        }

        "reply" => match args.as_slice() {
            [post] => match post.parse() {
                Ok(post_id) => Command::Dispatch(Action::ClearReplyTarget(post_id)),
                Err(_) => Command::Usage("usage: reply <post id> [comment id]"),
            },
            [post, comment] => match (post.parse(), comment.parse()) {
                (Ok(post_id), Ok(comment_id)) => Command::Dispatch(Action::SetReplyTarget {
                    post_id,
                    comment_id,
                }),
                _ => Command::Usage("usage: reply <post id> [comment id]"),
            },
            _ => Command::Usage("usage: reply <post id> [comment id]"),
        },

        "like" => match one_id(&args) {
            Some(post_id) => Command::Dispatch(Action::ToggleLike(post_id)),
            None => Command::Usage("usage: like <post id>"),
        },

        other => Command::Unknown(other.to_string()),
    }
}

fn one_id(args: &[&str]) -> Option<u64> {
    match args {
        [id] => id.parse().ok(),
        _ => None,
    }
}

fn rest_after<'a>(line: &'a str, verb: &str) -> &'a str {
    line[verb.len()..].trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_is_a_noop() {
        assert_eq!(parse("   "), Command::Dispatch(Action::None));
    }

    #[test]
    fn test_login_takes_two_arguments() {
        assert_eq!(
            parse("login alice pw"),
            Command::Dispatch(Action::Login {
                username: "alice".to_string(),
                password: "pw".to_string(),
            })
        );
        assert!(matches!(parse("login alice"), Command::Usage(_)));
    }

    #[test]
    fn test_post_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse("post hello   world"),
            Command::Dispatch(Action::SubmitPost {
                content: "hello   world".to_string(),
                image: None,
            })
        );
    }

    #[test]
    fn test_bare_post_dispatches_empty_content() {
        // Validation happens in the middleware, not here
        assert_eq!(
            parse("post"),
            Command::Dispatch(Action::SubmitPost {
                content: String::new(),
                image: None,
            })
        );
    }

    #[test]
    fn test_post_image_splits_path_and_text() {
        assert_eq!(
            parse("post-image /tmp/cat.jpg says hi"),
            Command::Dispatch(Action::SubmitPost {
                content: "says hi".to_string(),
                image: Some(PathBuf::from("/tmp/cat.jpg")),
            })
        );
        assert!(matches!(parse("post-image"), Command::Usage(_)));
    }

    #[test]
    fn test_comment_needs_id_and_text() {
        assert_eq!(
            parse("comment 5 nice one"),
            Command::Dispatch(Action::SubmitComment {
                post_id: 5,
                content: "nice one".to_string(),
            })
        );
        assert!(matches!(parse("comment 5"), Command::Usage(_)));
        assert!(matches!(parse("comment x hello"), Command::Usage(_)));
    }

    #[test]
    fn test_reply_sets_and_clears() {
        assert_eq!(
            parse("reply 5 42"),
            Command::Dispatch(Action::SetReplyTarget {
                post_id: 5,
                comment_id: 42,
            })
        );
        assert_eq!(
            parse("reply 5"),
            Command::Dispatch(Action::ClearReplyTarget(5))
        );
        assert!(matches!(parse("reply x"), Command::Usage(_)));
    }

    #[test]
    fn test_like_parses_the_post_id() {
        assert_eq!(parse("like 9"), Command::Dispatch(Action::ToggleLike(9)));
        assert!(matches!(parse("like nine"), Command::Usage(_)));
    }

    #[test]
    fn test_unknown_verb_is_reported() {
        assert_eq!(parse("frobnicate"), Command::Unknown("frobnicate".to_string()));
    }

    #[test]
    fn test_quit_and_exit() {
        assert_eq!(parse("quit"), Command::Dispatch(Action::Quit));
        assert_eq!(parse("exit"), Command::Dispatch(Action::Quit));
    }
}
