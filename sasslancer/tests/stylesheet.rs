use sasslancer::ast::{ExpressionKind, Selector, Statement, Unit, Url};
use sasslancer::{parse_tokens, ParseErrorKind, ParserConfig, Token};

fn fixture_tokens() -> Vec<Token> {
    let text = include_str!("fixtures/basic.tokens.json");
    serde_json::from_str(text).unwrap()
}

#[test]
fn parses_fixture() {
    let sheet = parse_tokens(fixture_tokens(), &ParserConfig::default()).unwrap();
    assert_eq!(sheet.statements.len(), 4);

    let Statement::Import(import) = &sheet.statements[0] else {
        panic!("expected import, got {:?}", sheet.statements[0]);
    };
    assert_eq!(import.url, Url::Absolute("reset.css".into()));

    let Statement::VariableAssignment(base) = &sheet.statements[1] else {
        panic!("expected assignment");
    };
    assert_eq!(
        base.value.kind,
        ExpressionKind::Length {
            value: 10.0,
            unit: Unit::Px
        }
    );

    let Statement::VariableAssignment(theme) = &sheet.statements[2] else {
        panic!("expected assignment");
    };
    let map = theme.value.as_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(
        map.get_by_name("accent").map(ToString::to_string).as_deref(),
        Some("darken($blue, 10%)")
    );

    let rule_set = sheet.rule_sets().next().unwrap();
    assert_eq!(rule_set.selector_text(), "nav > ul.menu:hover");
    assert_eq!(
        rule_set.selectors[4],
        Selector::Pseudo {
            name: "hover".into(),
            lang: None
        }
    );
    assert_eq!(rule_set.block.len(), 2);
}

#[test]
fn fixture_outline() {
    let sheet = parse_tokens(fixture_tokens(), &ParserConfig::default()).unwrap();
    let expected = "\
Stylesheet {
    Import url(reset.css)
    Variable $base = 10px
    Variable $theme = (primary: $blue, accent: darken($blue, 10%))
    RuleSet#0 `nav > ul.menu:hover` {
        margin: 0 auto
        font-family: \"Helvetica\", sans-serif
    }
}";
    assert_eq!(sheet.fancy_string(), expected);
}

#[test]
fn fixture_json() {
    let sheet = parse_tokens(fixture_tokens(), &ParserConfig::default()).unwrap();
    let json = serde_json::to_value(&sheet).unwrap();
    let statements = json["statements"].as_array().unwrap();
    assert_eq!(statements[0]["type"], "import");
    assert_eq!(statements[0]["url"]["type"], "absolute");
    assert_eq!(statements[1]["type"], "variableAssignment");
    assert_eq!(statements[1]["value"]["type"], "length");
    assert_eq!(statements[2]["value"]["type"], "map");
    assert_eq!(statements[3]["type"], "ruleSet");
    assert_eq!(statements[3]["selectors"][1]["type"], "child");
}

#[test]
fn error_reports_token_position() {
    let mut tokens = fixture_tokens();
    // drop the `;` after `$base: 10px`
    let removed = tokens.remove(10);
    assert_eq!(removed.text, ";");

    let err = parse_tokens(tokens, &ParserConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::UnexpectedToken);
    assert_eq!(err.position(), 10);
    assert_eq!(err.to_string(), "expected `;`, found `theme` (Variable) at 3:1");
}

#[test]
fn nesting_limit_comes_from_config() {
    let config = ParserConfig {
        max_nesting_depth: 1,
        ..ParserConfig::default()
    };
    let err = parse_tokens(fixture_tokens(), &config).unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::NestingTooDeep);
}
