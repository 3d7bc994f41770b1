//! Integration tests for netic.
//!
//! These tests exercise the public API from outside the crate, verifying that
//! elements, components, references, routes and the application work together.

use netic::app::{AppConfig, AppError, Application, DiscoveryWarning};
use netic::component::Component;
use netic::html::tags::{self, BR, DIV, H1, INPUT, LI, OPTION, P, SELECT, SPAN, STRONG, UL};
use netic::html::{for_each, raw, ElementError, Node, RenderOptions};
use netic::reactive::{Registry, RegistryError};
use netic::route::{discover_component, Export, RouteModule};
use netic::testing::{pretty_markup, render_component, render_to_string};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Element rendering
// ---------------------------------------------------------------------------

#[test]
fn test_nested_element_renders() {
    let el = DIV.classes(["text_center", "card"]).id("root").call([
        H1.call(["Hello"]),
        P.attr("data-x", "1").call(["World"]),
    ]);
    assert_eq!(
        render_to_string(el),
        r#"<div class="text-center card" id="root"><h1>Hello</h1><p data-x="1">World</p></div>"#
    );
}

#[test]
fn test_void_elements_have_no_closing_tag() {
    for template in tags::ALL.iter().filter(|t| t.is_self_closing()) {
        let out = render_to_string(template.build());
        assert_eq!(out, format!("<{}>", template.tag()));
    }
}

#[test]
fn test_unconfigured_template_child_placeholder() {
    assert_eq!(
        render_to_string(DIV.call::<[Node; 2]>([SPAN.into(), "x".into()])),
        "<div><Uninitialized span Element>x</div>"
    );
}

#[test]
fn test_invalid_class_names_rejected() {
    assert!(matches!(
        DIV.class("_private"),
        Err(ElementError::InvalidClassName { .. })
    ));
    assert!(DIV.class("").is_err());
    assert!(DIV.class("ok").is_ok());
}

#[test]
fn test_preview_does_not_consume() {
    let el = STRONG.call(["bold"]);
    assert_eq!(el.preview(), "<strong>...</strong>");
    assert_eq!(el.render(), "<strong>bold</strong>");
}

#[test]
fn test_for_each_builds_options() {
    let colors = ["red", "green", "blue"];
    let select = SELECT.call([for_each(
        colors,
        |c| *c != "green",
        |c| OPTION.attr("value", c).call([c]),
    )]);
    assert_eq!(
        render_to_string(select),
        r#"<select><option value="red">red</option><option value="blue">blue</option></select>"#
    );
}

#[test]
fn test_raw_and_escaped_text() {
    let el = P.call::<[Node; 2]>(["<b>".into(), raw("<i>ok</i>")]);
    assert_eq!(render_to_string(el), "<p>&lt;b&gt;<i>ok</i></p>");
}

#[test]
fn test_input_with_attributes() {
    let el = INPUT.attr("type", "text").attr("name", "q").call([SPAN.build()]);
    assert_eq!(render_to_string(el), r#"<input type="text" name="q">"#);
}

#[tokio::test]
async fn test_async_render_matches_sync() {
    let make = || UL.call([LI.call(["a"]), LI.call([BR.build()])]);
    let sync = make().render();
    let cooperative = make().render_async(RenderOptions::default()).await;
    assert_eq!(sync, cooperative);
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[test]
fn test_component_renders_once() {
    let mut component = Component::new("Card")
        .with(H1.call(["Title"]))
        .with(P.call(["Body"]));
    assert_eq!(render_component(&mut component), "<h1>Title</h1><p>Body</p>");
    assert_eq!(
        render_component(&mut component),
        "<Uninitialized h1 Element><Uninitialized p Element>"
    );
}

#[test]
fn test_pretty_markup_of_component() {
    let mut component = Component::new("List").with(UL.call([LI.call(["one"])]));
    let out = pretty_markup(&render_component(&mut component));
    assert_eq!(out, "<ul>\n  <li>\n    one\n  </li>\n</ul>");
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

#[test]
fn test_scope_registers_and_tracks_reads() {
    let mut registry = Registry::new();
    let bindings = registry
        .bind_scope(|s| {
            s.bind("colors", vec!["red", "green", "blue"]);
            s.bind("selected", String::from("green"));
        })
        .unwrap();

    let selected = bindings.get::<String>("selected").unwrap();
    let render = registry.computation("SelectBox");
    assert_eq!(registry.get(selected, render).unwrap(), "green");
    assert_eq!(registry.dependents("selected").unwrap(), vec!["SelectBox"]);
    assert!(registry.dependents("colors").unwrap().is_empty());

    registry.write(selected, String::from("blue")).unwrap();
    assert_eq!(registry.peek(selected).unwrap(), "blue");
}

#[test]
fn test_names_unique_per_session() {
    let mut registry = Registry::new();
    registry
        .bind_scope(|s| {
            s.bind("count", 0_i32);
        })
        .unwrap();

    let err = registry
        .bind_scope(|s| {
            s.bind("fresh", 1_i32);
            s.bind("count", 2_i32);
        })
        .unwrap_err();
    assert_eq!(err, RegistryError::NameConflict { name: "count".into() });
    // The conflicting scope registered nothing.
    assert!(!registry.contains("fresh"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_lookup_type_mismatch() {
    let mut registry = Registry::new();
    registry
        .bind_scope(|s| {
            s.bind("flag", true);
        })
        .unwrap();
    assert!(matches!(
        registry.lookup::<i32>("flag"),
        Err(RegistryError::TypeMismatch { .. })
    ));
    assert!(registry.lookup::<bool>("flag").is_ok());
}

#[test]
fn test_handles_stay_with_their_registry() {
    let mut people = Registry::new();
    let age = people
        .bind_scope(|s| {
            s.bind("age", 32_i64);
        })
        .unwrap()
        .get::<i64>("age")
        .unwrap();

    let mut bank = Registry::new();
    bank.bind_scope(|s| {
        s.bind("balance", 1_000_000_i64);
    })
    .unwrap();
    let teller = bank.computation("teller");

    assert_eq!(bank.get(age, teller).unwrap_err(), RegistryError::StaleHandle);
    assert!(bank.dependents("balance").unwrap().is_empty());
    assert_eq!(people.peek(age).unwrap(), 32);
}

#[test]
fn test_script_text_not_escaped() {
    let el = tags::SCRIPT.call(["if (a && b < c) {}"]);
    assert_eq!(render_to_string(el), "<script>if (a && b < c) {}</script>");
}

// ---------------------------------------------------------------------------
// Routes and application
// ---------------------------------------------------------------------------

fn index_route() -> RouteModule {
    RouteModule::new("index")
        .export("blue_thing", Export::Module("blue_thing".into()))
        .export(
            "App",
            Component::new("App").with(DIV.call([STRONG.classes("blue").call(["Blue thing"])])),
        )
}

#[test]
fn test_discover_component() {
    let route = index_route();
    let (name, component) = discover_component(&route).unwrap();
    assert_eq!(name, "App");
    assert_eq!(component.len(), 1);
}

#[test]
fn test_full_build() {
    let mut app = Application::new(AppConfig::new().with_title("Demo").with_lang("en"));
    app.add_route(index_route()).unwrap();
    app.add_route(RouteModule::new("empty")).unwrap();
    app.references_mut()
        .bind_scope(|s| {
            s.bind("selected", String::from("green"));
        })
        .unwrap();

    let report = app.discover();
    assert_eq!(report.imported_modules, vec!["blue_thing".to_string()]);

    let output = app.build();
    assert_eq!(
        output.pages["/index"],
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>Demo</title></head><body><div><strong class="blue">Blue thing</strong></div></body></html>"#
    );
    assert_eq!(
        output.warnings,
        vec![DiscoveryWarning::NoComponent {
            route: "/empty".into()
        }]
    );
    assert_eq!(output.references[0].alias, "a");
}

#[test]
fn test_unknown_route() {
    let mut app = Application::default();
    assert_eq!(
        app.render_route("/nope").unwrap_err(),
        AppError::UnknownRoute("/nope".into())
    );
}

// ---------------------------------------------------------------------------
// view! macro
// ---------------------------------------------------------------------------

#[cfg(feature = "macros")]
mod view_macro {
    use netic::html::Node;
    use netic::testing::render_to_string;
    use netic::view;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_view_single_root() {
        let name = "World";
        let el = view! {
            <div class="greeting box" id="hi">
                <h1>"Hello"</h1>
                <p data-name={name}>{name}</p>
                <br />
            </div>
        };
        assert_eq!(
            render_to_string(el),
            r#"<div class="greeting box" id="hi"><h1>Hello</h1><p data-name="World">World</p><br></div>"#
        );
    }

    #[test]
    fn test_view_multiple_roots() {
        let node: Node = view! {
            <h1>"Title"</h1>
            <input type="text" required />
        };
        assert_eq!(
            render_to_string(node),
            r#"<h1>Title</h1><input type="text" required="">"#
        );
    }
}
