#[cfg(test)]
mod verify {
    use std::mem;
    use std::rc::Rc;

    use serde_json::{json, Value};

    use quarry::extract::{
        CompositeRule, CursorHandle, ExtractError, LineCursor, Parser, Pattern, Rule,
        SingleLineRule, Step,
    };

    /// A bare region rule that remembers every line of its region, plus
    /// the end line, exactly the way a domain rule would via the
    /// extension contract.
    struct Collect {
        pattern: Pattern,
        cursor: Option<CursorHandle>,
        lines: Vec<String>,
        ended_with: Option<String>,
    }

    impl Collect {
        fn new(start: &str, end: &str) -> Collect {
            Collect {
                pattern: Pattern::delimited(start, end),
                cursor: None,
                lines: Vec::new(),
                ended_with: None,
            }
        }
    }

    impl Rule for Collect {
        fn name(&self) -> &str {
            "collector"
        }

        fn pattern(&self) -> &Pattern {
            &self.pattern
        }

        fn cursor(&self) -> Option<&CursorHandle> {
            self.cursor
                .as_ref()
        }

        fn attach(&mut self, cursor: &CursorHandle) {
            self.cursor = Some(Rc::clone(cursor));
        }

        fn enter(&mut self, _start_line: &str) -> Result<(), ExtractError> {
            loop {
                match self.step()? {
                    Step::End => return Ok(()),
                    Step::Line(line) => self
                        .lines
                        .push(line),
                }
            }
        }

        fn on_end(&mut self, end_line: &str) {
            self.ended_with = Some(end_line.to_owned());
        }

        fn reset(&mut self) -> Value {
            self.cursor = None;
            self.ended_with = None;
            json!(mem::take(&mut self.lines))
        }
    }

    fn integers() -> SingleLineRule {
        SingleLineRule::new("integers", Pattern::single(r"\d+"), |line| {
            line.trim()
                .parse::<i64>()
                .map(|n| json!(n))
                .map_err(|e| e.to_string())
        })
    }

    fn words() -> SingleLineRule {
        SingleLineRule::new("words", Pattern::single(r"\w+"), |line| Ok(json!(line)))
    }

    #[test]
    fn region_consumes_exactly_its_own_lines() {
        let mut rule = Collect::new("START", "END$");
        let cursor = LineCursor::shared("a\nb\nc\nEND\ntrailing", "\n");

        rule.attach(&cursor);
        rule.enter("START")
            .unwrap();

        assert_eq!(rule.lines, vec!["a", "b", "c"]);
        assert_eq!(rule.ended_with, Some("END".to_owned()));

        // the end line was consumed but never yielded, and the line after
        // it is still there for whoever pulls next
        assert_eq!(
            cursor
                .borrow_mut()
                .next_line(),
            Some("trailing".to_owned())
        );
    }

    #[test]
    fn exhaustion_before_the_end_tag_is_fatal() {
        let mut rule = Collect::new("START", "END$");
        let cursor = LineCursor::shared("a\nb", "\n");

        rule.attach(&cursor);
        let result = rule.enter("START");

        assert_eq!(
            result,
            Err(ExtractError::UnexpectedEndOfInput {
                rule: "collector".to_owned(),
                line: 2,
            })
        );
    }

    #[test]
    fn reset_returns_the_region_and_clears_state() {
        let mut rule = Collect::new("START", "END$");

        let cursor = LineCursor::shared("one\nEND", "\n");
        rule.attach(&cursor);
        rule.enter("START")
            .unwrap();
        assert_eq!(rule.reset(), json!(["one"]));

        // no leakage into an independent second region
        let cursor = LineCursor::shared("two\nEND", "\n");
        rule.attach(&cursor);
        rule.enter("START")
            .unwrap();
        assert_eq!(rule.reset(), json!(["two"]));

        // and a reset on empty state is the default shape, not an error
        assert_eq!(rule.reset(), json!([]));
    }

    #[test]
    fn skip_advances_blindly() {
        let mut rule = Collect::new("START", "END$");
        let cursor = LineCursor::shared("x\ny\nz", "\n");

        rule.attach(&cursor);
        rule.skip(2)
            .unwrap();

        assert_eq!(
            cursor
                .borrow_mut()
                .next_line(),
            Some("z".to_owned())
        );
    }

    #[test]
    fn skip_past_the_end_is_the_same_protocol_violation() {
        let mut rule = Collect::new("START", "END$");
        let cursor = LineCursor::shared("x", "\n");

        rule.attach(&cursor);
        let result = rule.skip(2);

        assert!(matches!(
            result,
            Err(ExtractError::UnexpectedEndOfInput { .. })
        ));
        // the failed skip moved nothing
        assert_eq!(
            cursor
                .borrow_mut()
                .next_line(),
            Some("x".to_owned())
        );
    }

    #[test]
    #[should_panic(expected = "attached")]
    fn stepping_an_unattached_rule_is_a_programming_error() {
        let mut rule = Collect::new("START", "END$");
        let _ = rule.step();
    }

    #[test]
    #[should_panic(expected = "single-line pattern")]
    fn end_tags_are_undefined_for_single_line_rules() {
        words().matches_end("anything");
    }

    #[test]
    fn start_tags_respect_the_anchoring_mode() {
        let anchored = words();
        assert!(anchored.matches_start("word"));
        assert!(!anchored.matches_start("  word"));

        let floating = SingleLineRule::new(
            "floating",
            Pattern::single(r"\w+").anywhere(),
            |line| Ok(json!(line)),
        );
        assert!(floating.matches_start("  word"));
    }

    #[test]
    fn first_declared_child_wins_the_line() {
        // both children match a digit line; the integer rule is declared
        // first and the word rule must never see those lines
        let region = CompositeRule::new(
            "region",
            Pattern::delimited("START", "END$"),
            vec![Box::new(integers()), Box::new(words())],
        );
        let mut parser = Parser::new(region);

        let result = parser
            .feed_delimited("START 3 hello_world foo_bar 4 END", " ")
            .unwrap();

        assert_eq!(
            result,
            Some(json!([[3, 4], ["hello_world", "foo_bar"]]))
        );
    }

    #[test]
    fn lines_matching_no_child_fall_through() {
        let region = CompositeRule::new(
            "region",
            Pattern::delimited("START", "END$"),
            vec![Box::new(integers())],
        );
        let mut parser = Parser::new(region);

        let result = parser
            .feed("START\n1\n???\n2\nEND")
            .unwrap();

        assert_eq!(result, Some(json!([[1, 2]])));
    }

    #[test]
    fn a_parent_end_tag_belongs_to_an_active_child() {
        // the child's region swallows the parent's end tag line; only the
        // second occurrence, seen by the parent itself, closes the region
        let mut region = CompositeRule::new(
            "region",
            Pattern::delimited("BEGIN", "FIN$"),
            vec![Box::new(Collect::new("sub", "stop$"))],
        );
        let cursor = LineCursor::shared("sub\nFIN\nstop\nnoise\nFIN\ntrailing", "\n");

        region.attach(&cursor);
        region
            .enter("BEGIN")
            .unwrap();

        assert_eq!(region.reset(), json!([["FIN"]]));
        assert_eq!(
            cursor
                .borrow_mut()
                .next_line(),
            Some("trailing".to_owned())
        );
    }

    #[test]
    fn feed_returns_after_the_first_completed_region() {
        let mut parser = Parser::new(integers());

        let result = parser
            .feed_delimited("1 2 3", " ")
            .unwrap();

        assert_eq!(result, Some(json!([1])));
    }

    #[test]
    fn absence_of_the_region_is_an_answer_not_an_error() {
        let region = CompositeRule::new(
            "region",
            Pattern::delimited("START", "END$"),
            vec![Box::new(integers())],
        );
        let mut parser = Parser::new(region);

        assert_eq!(parser.feed("nothing relevant"), Ok(None));
        assert_eq!(parser.feed(""), Ok(None));
    }

    #[test]
    fn the_same_parser_serves_independent_feeds() {
        let region = CompositeRule::new(
            "region",
            Pattern::delimited("START", "END$"),
            vec![Box::new(integers())],
        );
        let mut parser = Parser::new(region);

        let first = parser
            .feed("START\n1\n2\nEND")
            .unwrap();
        assert_eq!(first, Some(json!([[1, 2]])));

        let second = parser
            .feed("START\n7\nEND")
            .unwrap();
        assert_eq!(second, Some(json!([[7]])));
    }

    #[test]
    fn an_unterminated_region_raises_rather_than_truncates() {
        let region = CompositeRule::new(
            "region",
            Pattern::delimited("START", "END$"),
            vec![Box::new(integers())],
        );
        let mut parser = Parser::new(region);

        let result = parser.feed("START\n1\n2\nEND_TYPO");

        assert!(matches!(
            result,
            Err(ExtractError::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    fn malformed_fields_surface_with_the_rule_name() {
        let broken = SingleLineRule::new("numbers", Pattern::single(r"\d"), |line| {
            line.trim()
                .parse::<i64>()
                .map(|n| json!(n))
                .map_err(|_| format!("{:?} is not an integer", line))
        });
        let region = CompositeRule::new(
            "region",
            Pattern::delimited("START", "END$"),
            vec![Box::new(broken)],
        );
        let mut parser = Parser::new(region);

        let result = parser.feed("START\n1x\nEND");

        match result {
            Err(ExtractError::Malformed { rule, details }) => {
                assert_eq!(rule, "numbers");
                assert!(details.contains("1x"));
            }
            other => panic!("expected a malformed-field error, got {:?}", other),
        }
    }
}
