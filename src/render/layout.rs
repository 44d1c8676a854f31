//! Pure combinators that compose [`RenderResult`]s into bigger ones.
//!
//! Every combinator computes the content length of the composite from the lengths
//! of its children plus the fixed cost of the markers it adds, so layout decisions
//! never have to look at emitted output.

use crate::render::result::RenderResult;

/// Maximum length one alternative may accumulate before the element join
/// inserts a line break. Tunable, not derived from any terminal width.
pub(crate) const LENGTH_FOR_RULE_SPLIT: usize = 80;

/// Append a repetition marker (`?`, `+` or `*`) after `child`, plus a trailing
/// `?` when the repetition is non-greedy.
pub(crate) fn quantifier(child: RenderResult, symbol: char, greedy: bool) -> RenderResult {
    let length = child.content_length() + 1 + usize::from(!greedy);

    RenderResult::new(
        length,
        Box::new(move |em| {
            child.emit(em);
            em.symbol(symbol.to_string());

            if !greedy {
                em.symbol("?");
            }
        }),
    )
}

/// Prefix `child` with a negation marker.
pub(crate) fn not(child: RenderResult) -> RenderResult {
    let length = child.content_length() + 1;

    RenderResult::new(
        length,
        Box::new(move |em| {
            em.symbol("~");
            child.emit(em);
        }),
    )
}

/// Join two endpoints with the two-character range separator.
pub(crate) fn range(from: RenderResult, to: RenderResult) -> RenderResult {
    let length = from.content_length() + to.content_length() + 2;

    RenderResult::new(
        length,
        Box::new(move |em| {
            from.emit(em);
            em.symbol("..");
            to.emit(em);
        }),
    )
}

enum Separator {
    Space,
    Break,
}

/// Concatenate the elements of one alternative, separated by single spaces.
///
/// Whenever the length accumulated since the last break exceeds
/// [`LENGTH_FOR_RULE_SPLIT`], the next separator becomes a line break and the
/// counter resets, so long rule bodies wrap while short ones stay on one line.
pub(crate) fn join_through_length(children: Vec<RenderResult>) -> RenderResult {
    let mut length = 0;
    let mut running = 0;
    let mut separators = Vec::new();

    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            if running > LENGTH_FOR_RULE_SPLIT {
                separators.push(Separator::Break);
                running = 0;
            } else {
                separators.push(Separator::Space);
            }

            length += 1;
        }

        running += child.content_length();
        length += child.content_length();
    }

    RenderResult::new(
        length,
        Box::new(move |em| {
            for (i, child) in children.into_iter().enumerate() {
                if i > 0 {
                    match separators[i - 1] {
                        Separator::Space => em.whitespace(),
                        Separator::Break => em.crlf(),
                    }
                }

                child.emit(em);
            }
        }),
    )
}

/// Render an alternation.
///
/// In a nested context the whole group is wrapped in parentheses with ` | `
/// between the alternatives on one line. As the entire rule body it gets no
/// brackets and a line break before every `|` instead.
pub(crate) fn group_using_pipe(mut children: Vec<RenderResult>, needs_brackets: bool) -> RenderResult {
    match children.len() {
        0 => RenderResult::empty(),
        1 => children.remove(0),
        n => {
            let inner: usize = children.iter().map(RenderResult::content_length).sum();
            let length = inner + 3 * (n - 1) + if needs_brackets { 2 } else { 0 };

            RenderResult::new(
                length,
                Box::new(move |em| {
                    if needs_brackets {
                        em.symbol("(");
                    }

                    for (i, child) in children.into_iter().enumerate() {
                        if i > 0 {
                            if needs_brackets {
                                em.whitespace();
                            } else {
                                em.crlf();
                            }

                            em.symbol("|");
                            em.whitespace();
                        }

                        child.emit(em);
                    }

                    if needs_brackets {
                        em.symbol(")");
                    }
                }),
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::document::Marker;
    use crate::render::result::{collect_markers, marker_cost};

    fn chunk(len: usize) -> RenderResult {
        let text = "x".repeat(len);
        RenderResult::new(len, Box::new(move |em| em.string(text)))
    }

    #[test]
    fn test_quantifier_lengths() {
        for symbol in ['?', '+', '*'] {
            let greedy = quantifier(chunk(7), symbol, true);
            assert_eq!(greedy.content_length(), 8);
            assert_eq!(marker_cost(&collect_markers(greedy)), 8);

            let non_greedy = quantifier(chunk(7), symbol, false);
            assert_eq!(non_greedy.content_length(), 9);
            assert_eq!(marker_cost(&collect_markers(non_greedy)), 9);
        }
    }

    #[test]
    fn test_quantifier_marker_order() {
        let markers = collect_markers(quantifier(chunk(1), '*', false));

        assert_eq!(
            markers,
            [
                Marker::Str("x".to_string()),
                Marker::Symbol("*".to_string()),
                Marker::Symbol("?".to_string()),
            ]
        );
    }

    #[test]
    fn test_not_prefixes() {
        let result = not(chunk(3));
        assert_eq!(result.content_length(), 4);

        let markers = collect_markers(result);
        assert_eq!(markers[0], Marker::Symbol("~".to_string()));
    }

    #[test]
    fn test_range_length() {
        let result = range(chunk(3), chunk(3));
        assert_eq!(result.content_length(), 8);

        let markers = collect_markers(result);
        assert_eq!(markers[1], Marker::Symbol("..".to_string()));
        assert_eq!(marker_cost(&markers), 8);
    }

    #[test]
    fn test_join_short_stays_on_one_line() {
        let result = join_through_length(vec![chunk(5), chunk(5), chunk(5)]);
        assert_eq!(result.content_length(), 17);

        let markers = collect_markers(result);
        assert!(!markers.contains(&Marker::Crlf));
        assert_eq!(markers.iter().filter(|m| **m == Marker::Whitespace).count(), 2);
    }

    #[test]
    fn test_join_breaks_and_resets() {
        // 50 + 50 overflows the threshold, so a break lands before the third
        // element and the counter restarts from there.
        let result = join_through_length(vec![chunk(50), chunk(50), chunk(50), chunk(10)]);

        let markers = collect_markers(result);
        let separators: Vec<_> = markers
            .iter()
            .filter(|m| matches!(m, Marker::Whitespace | Marker::Crlf))
            .collect();

        assert_eq!(separators.len(), 3);
        assert_eq!(*separators[0], Marker::Whitespace);
        assert_eq!(*separators[1], Marker::Crlf);
        assert_eq!(*separators[2], Marker::Whitespace);
    }

    #[test]
    fn test_join_never_doubles_breaks() {
        let children: Vec<_> = (0..8).map(|_| chunk(90)).collect();
        let result = join_through_length(children);

        let markers = collect_markers(result);
        for pair in markers.windows(2) {
            assert!(pair[0] != Marker::Crlf || pair[1] != Marker::Crlf);
        }
    }

    #[test]
    fn test_join_cost_matches_length() {
        let result = join_through_length(vec![chunk(90), chunk(90), chunk(2), chunk(90)]);
        let length = result.content_length();
        assert_eq!(marker_cost(&collect_markers(result)), length);
    }

    #[test]
    fn test_pipe_group_bracketed() {
        let result = group_using_pipe(vec![chunk(2), chunk(2)], true);
        assert_eq!(result.content_length(), 9);

        let markers = collect_markers(result);
        assert_eq!(markers.first(), Some(&Marker::Symbol("(".to_string())));
        assert_eq!(markers.last(), Some(&Marker::Symbol(")".to_string())));
        assert!(!markers.contains(&Marker::Crlf));
        assert_eq!(marker_cost(&markers), 9);
    }

    #[test]
    fn test_pipe_group_top_level() {
        let result = group_using_pipe(vec![chunk(2), chunk(2), chunk(2)], false);
        assert_eq!(result.content_length(), 12);

        let markers = collect_markers(result);
        assert!(!markers.contains(&Marker::Symbol("(".to_string())));
        assert_eq!(markers.iter().filter(|m| **m == Marker::Crlf).count(), 2);
        assert_eq!(marker_cost(&markers), 12);
    }

    #[test]
    fn test_pipe_group_single_alternative_passthrough() {
        let result = group_using_pipe(vec![chunk(4)], true);
        assert_eq!(result.content_length(), 4);

        let markers = collect_markers(result);
        assert_eq!(markers, [Marker::Str("xxxx".to_string())]);
    }
}
