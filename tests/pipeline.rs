//! End-to-end tests: text in, answers and error records out.

use mathq::service::ErrorSnapshot;
use mathq::{
    evaluate, lex, parse, Config, Error, ErrorKind, ExpressionService, InMemoryErrorRepository,
    Interpreter, Lexer, Method, Parser, Pipeline, ServiceError, SyntaxFault, Token,
};
use std::sync::Arc;
use std::thread;

fn tokens(texts: &[&str]) -> Vec<Token> {
    texts
        .iter()
        .map(|text| match *text {
            "What is" => Token::Question(text.to_string()),
            "?" => Token::Punctuation(text.to_string()),
            t if t.chars().all(|c| c.is_ascii_digit()) => Token::Number(t.to_string()),
            t => Token::Operand(t.to_string()),
        })
        .collect()
}

#[test]
fn lex_parse_evaluate_by_hand() {
    let lexed = lex("What is 3 plus 10 minus 5?").unwrap();
    assert_eq!(
        lexed,
        tokens(&["What is", "3", "plus", "10", "minus", "5", "?"])
    );

    let parsed = parse(lexed).unwrap();
    assert_eq!(parsed, tokens(&["3", "plus", "10", "minus", "5"]));

    assert_eq!(evaluate(&parsed).unwrap(), 8);
}

#[test]
fn sequential_evaluation_without_precedence() {
    let pipeline = Pipeline::new(&Config::default()).unwrap();
    assert_eq!(
        pipeline
            .evaluate("What is 42 divided by 6 plus 3 multiplied by 8?")
            .unwrap(),
        80
    );
    assert_eq!(pipeline.evaluate("What is 2 plus 3 multiplied by 4?").unwrap(), 20);
}

#[test]
fn grammar_violations_are_reported_with_position() {
    let parser = Parser::new().unwrap();

    let trailing_operand = parser.parse(tokens(&["What is", "1", "plus", "?"]));
    assert!(matches!(
        trailing_operand,
        Err(Error::InvalidSyntax {
            fault: SyntaxFault::ExpectedNumber,
            position: 3
        })
    ));

    let after_final = parser.parse(tokens(&["What is", "1", "?", "plus", "2", "?"]));
    assert!(matches!(
        after_final,
        Err(Error::InvalidSyntax {
            fault: SyntaxFault::TrailingTokens,
            position: 3
        })
    ));
}

#[test]
fn one_lexer_serves_many_threads() {
    let lexer = Arc::new(Lexer::new().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let lexer = Arc::clone(&lexer);
            thread::spawn(move || lexer.lex(&format!("What is {n} plus {n}?")).unwrap())
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let lexed = handle.join().unwrap();
        assert_eq!(lexed[1], Token::Number(n.to_string()));
        assert_eq!(lexed.len(), 5);
    }
}

#[test]
fn service_counts_failures_per_expression() {
    let repository = Arc::new(InMemoryErrorRepository::new());
    let service = ExpressionService::new(
        Pipeline::new(&Config::default()).unwrap(),
        Arc::clone(&repository),
    );

    assert_eq!(service.evaluate("What is 5 plus 13?").unwrap(), 18);
    for _ in 0..2 {
        assert!(matches!(
            service.evaluate("What is 1 plus plus 2?"),
            Err(ServiceError::Expression(Error::InvalidSyntax { .. }))
        ));
    }
    let err = service.validate("What is the meaning of life?").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::UnsupportedOperation));

    let errors = service.expression_errors().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].expression, "What is 1 plus plus 2?");
    assert_eq!(errors[0].method, Method::Evaluate);
    assert_eq!(errors[0].frequency, 2);
    assert_eq!(errors[1].kind, ErrorKind::UnsupportedOperation);
    assert_eq!(errors[1].method, Method::Validate);
}

#[test]
fn error_counts_survive_a_snapshot() {
    let repository = Arc::new(InMemoryErrorRepository::new());
    let service = ExpressionService::new(
        Pipeline::new(&Config::default()).unwrap(),
        Arc::clone(&repository),
    );
    service.evaluate("What is 4 divided by 0?").unwrap_err();

    let json = repository.snapshot().unwrap().to_json().unwrap();
    let restored = Arc::new(InMemoryErrorRepository::from_snapshot(
        ErrorSnapshot::from_json(&json).unwrap(),
    ));
    let service = ExpressionService::new(
        Pipeline::new(&Config::default()).unwrap(),
        Arc::clone(&restored),
    );
    service.evaluate("What is 4 divided by 0?").unwrap_err();

    let errors = service.expression_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Arithmetic);
    assert_eq!(errors[0].frequency, 2);
}

#[test]
fn config_file_drives_the_pipeline() {
    let path = std::env::temp_dir().join(format!("mathq-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "max_input_len": 10, "record_errors": false }"#).unwrap();
    let config = Config::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let repository = Arc::new(InMemoryErrorRepository::new());
    let service = ExpressionService::with_config(
        Pipeline::new(&config).unwrap(),
        Arc::clone(&repository),
        &config,
    );

    let err = service.evaluate("What is 100 plus 1?").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InputTooLong));
    assert!(repository.is_empty());
}
