use sh_reflect::ast::{Class, Member, Node, NodeKind};
use sh_reflect::lexer::TokenKind;
use sh_reflect::{LexError, ParseError, Parser, Position};

fn first_class(input: &str) -> Class {
    let unit = Parser::parse_str(input).unwrap();
    match unit.declarations.into_iter().next() {
        Some(Node::Class(class)) => class,
        other => panic!("Expected Class, got {:?}", other),
    }
}

#[test]
fn test_parse_empty() {
    let unit = Parser::parse_str("").unwrap();
    assert!(unit.declarations.is_empty());
}

#[test]
fn test_parse_plain_class() {
    let class = first_class("class Foo { int x; };");
    assert_eq!(class.name.to_string(), "Foo");
    assert_eq!(class.keyword.kind, TokenKind::Class);
    assert!(class.attribute_sequences.is_empty());
    // unannotated members are not captured
    assert!(class.members.is_empty());
}

#[test]
fn test_parse_struct() {
    let class = first_class("struct Point { [[SH::Reflect]] float x; [[SH::Reflect]] float y; };");
    assert_eq!(class.keyword.kind, TokenKind::Struct);
    assert_eq!(class.fields().count(), 2);
}

#[test]
fn test_parse_class_attribute() {
    let class = first_class("class [[SH::Reflect]] Player {};");
    assert_eq!(class.attribute_sequences.len(), 1);
    let attr = &class.attribute_sequences[0].attributes[0];
    assert!(attr.is_namespaced());
    assert_eq!(attr.namespace.as_ref().unwrap().value(), "SH");
    assert_eq!(attr.name.value(), "Reflect");
}

#[test]
fn test_parse_using_attribute_sequence() {
    let class = first_class("class [[using SH: Reflect, Serialize(2)]] C {};");
    let seq = &class.attribute_sequences[0];
    assert_eq!(seq.using.as_ref().unwrap().value(), "SH");
    assert_eq!(seq.attributes.len(), 2);
    for attr in &seq.attributes {
        assert!(!attr.is_namespaced());
        assert_eq!(seq.effective_namespace(attr), Some("SH"));
    }
    let params = seq.attributes[1].params();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].value.value(), "2");
}

#[test]
fn test_explicit_namespace_overrides_using() {
    let class = first_class("class [[using SH: Reflect, Other::Reflect]] C {};");
    let seq = &class.attribute_sequences[0];
    assert_eq!(seq.effective_namespace(&seq.attributes[1]), Some("Other"));
}

#[test]
fn test_attributes_without_commas() {
    let class = first_class("class [[SH::Reflect SH::Serialize]] C {};");
    assert_eq!(class.attribute_sequences[0].attributes.len(), 2);
}

#[test]
fn test_multiple_attribute_sequences() {
    let class = first_class("class [[SH::Reflect]] [[Editor(\"hidden\")]] C {};");
    assert_eq!(class.attribute_sequences.len(), 2);
    let param = &class.attribute_sequences[1].attributes[0].params()[0];
    assert_eq!(param.value.value(), "hidden");
}

#[test]
fn test_empty_params() {
    let class = first_class("class [[SH::Reflect()]] C {};");
    let attr = &class.attribute_sequences[0].attributes[0];
    assert!(attr.params.as_ref().is_some_and(|p| p.is_empty()));
}

#[test]
fn test_method_is_not_field() {
    let class = first_class("class C { [[SH::Reflect]] void Compute(int x); };");
    assert_eq!(class.fields().count(), 0);
    let methods: Vec<_> = class.methods().collect();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].name.value(), "Compute");
    assert_eq!(methods[0].return_type_name(), "void");
    let params: Vec<&str> = methods[0].discarded_params.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(params, vec!["(", "int", "x", ")"]);
}

#[test]
fn test_method_with_body() {
    let class = first_class(
        "class C { public: [[SH::Reflect]] int Get() const { if (x) { return 1; } return 0; } \
         [[SH::Reflect]] int x; };",
    );
    assert_eq!(class.methods().count(), 1);
    let fields: Vec<_> = class.fields().collect();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name.value(), "x");
}

#[test]
fn test_member_order_preserved() {
    let class = first_class(
        "class C { [[SH::Reflect]] int a; [[SH::Reflect]] void f(); [[SH::Reflect]] int b; };",
    );
    let names: Vec<&str> = class
        .members
        .iter()
        .map(|m| match m {
            Member::Field(f) => f.name.value(),
            Member::Method(m) => m.name.value(),
        })
        .collect();
    assert_eq!(names, vec!["a", "f", "b"]);
}

#[test]
fn test_access_specifiers_ignored() {
    let class = first_class(
        "class C { public: [[SH::Reflect]] int a; protected: [[SH::Reflect]] int b; \
         private: [[SH::Reflect]] int c; };",
    );
    assert_eq!(class.fields().count(), 3);
}

#[test]
fn test_auto_member_type() {
    let class = first_class("class C { [[SH::Reflect]] auto x; };");
    assert_eq!(class.fields().next().unwrap().type_name(), "auto");
}

#[test]
fn test_base_clause() {
    let class = first_class("class D : public Base, private NS::Other { };");
    let bases: Vec<String> = class.bases.iter().map(|b| b.to_string()).collect();
    assert_eq!(bases, vec!["Base", "NS::Other"]);
}

#[test]
fn test_nested_class_members_not_hoisted() {
    let class = first_class(
        "class Outer { [[SH::Reflect]] int a; class Inner { [[SH::Reflect]] int b; }; };",
    );
    let names: Vec<&str> = class.fields().map(|f| f.name.value()).collect();
    assert_eq!(names, vec!["a"]);
}

#[test]
fn test_forward_declaration() {
    let unit = Parser::parse_str("class Fwd; class Real {};").unwrap();
    assert_eq!(unit.declarations.len(), 2);
    match &unit.declarations[0] {
        Node::Class(class) => assert!(class.members.is_empty()),
        other => panic!("Expected Class, got {:?}", other),
    }
}

#[test]
fn test_namespace_children() {
    let unit = Parser::parse_str("namespace A { namespace B { class X {}; } class Y {}; }").unwrap();
    assert_eq!(unit.declarations.len(), 1);
    let outer = &unit.declarations[0];
    assert_eq!(outer.kind(), NodeKind::Namespace);
    let kinds: Vec<NodeKind> = outer.children().iter().map(Node::kind).collect();
    assert_eq!(kinds, vec![NodeKind::Namespace, NodeKind::Class]);
}

#[test]
fn test_macro_ends_at_line_end() {
    let unit = Parser::parse_str("#pragma once\nenum class Color { Red };").unwrap();
    let kinds: Vec<NodeKind> = unit.declarations.iter().map(Node::kind).collect();
    assert_eq!(kinds, vec![NodeKind::Macro]);
    match &unit.declarations[0] {
        Node::Macro(m) => {
            let rest: Vec<&str> = m.rest.iter().map(|l| l.value()).collect();
            assert_eq!(rest, vec!["pragma", "once"]);
        }
        other => panic!("Expected Macro, got {:?}", other),
    }
}

#[test]
fn test_quote_char_in_method_body() {
    let class = first_class(
        "class C { [[SH::Reflect]] char q; bool f(char c) { return c == '\"'; } [[SH::Reflect]] int n; };",
    );
    let names: Vec<&str> = class.fields().map(|f| f.name.value()).collect();
    assert_eq!(names, vec!["q", "n"]);
}

#[test]
fn test_class_has_no_generic_children() {
    let unit = Parser::parse_str("class C { [[SH::Reflect]] int a; };").unwrap();
    assert!(unit.declarations[0].children().is_empty());
}

#[test]
fn test_macros() {
    let unit = Parser::parse_str("#pragma once\n#include \"player.h\"\nclass A {};").unwrap();
    let kinds: Vec<NodeKind> = unit.declarations.iter().map(Node::kind).collect();
    assert_eq!(kinds, vec![NodeKind::Macro, NodeKind::Macro, NodeKind::Class]);
    match &unit.declarations[1] {
        Node::Macro(m) => {
            let rest: Vec<&str> = m.rest.iter().map(|l| l.value()).collect();
            assert_eq!(rest, vec!["include", "player.h"]);
        }
        other => panic!("Expected Macro, got {:?}", other),
    }
}

#[test]
fn test_comments_are_ignored() {
    let class = first_class(
        "// header\nclass /* note */ [[SH::Reflect]] C { // x\n [[SH::Reflect]] int a; };",
    );
    assert_eq!(class.fields().count(), 1);
}

#[test]
fn test_empty_attribute_sequence_is_an_error() {
    let err = Parser::parse_str("[[]]").unwrap_err();
    assert_eq!(
        err,
        ParseError::TokenMismatch {
            expected: TokenKind::Identifier,
            found: TokenKind::AttributeEnd,
            text: "]]".to_string(),
            pos: Position::new(2, 1, 3),
        }
    );
}

#[test]
fn test_attribute_error_position_after_spaces() {
    let err = Parser::parse_str("class [[ ]] C {};").unwrap_err();
    assert_eq!(err.position(), Some(Position::new(9, 1, 10)));
}

#[test]
fn test_bad_param_is_an_error() {
    let err = Parser::parse_str("class [[SH::Reflect(;)]] C {};").unwrap_err();
    assert!(matches!(err, ParseError::ExpectedLiteral { found: TokenKind::Semicolon, .. }));
}

#[test]
fn test_unterminated_class_body() {
    let err = Parser::parse_str("class C { [[SH::Reflect]] int a;").unwrap_err();
    assert_eq!(err, ParseError::UnexpectedEof { expected: TokenKind::CloseBrace });
}

#[test]
fn test_lex_error_propagates() {
    let err = Parser::parse_str("class C { \"oops };").unwrap_err();
    assert!(matches!(err, ParseError::LexError(LexError::UnterminatedString { .. })));
}

#[test]
fn test_error_display() {
    let err = Parser::parse_str("[[]]").unwrap_err();
    assert_eq!(err.to_string(), "Expected identifier, found ']]' ']]' at line 1, column 3");
}
