//! Stylesheets shared by several tests.

#![allow(dead_code)]

/// A button component with states, parts and variables.
pub const BUTTON: &str = r#"
:vars {
    size: 12px;
    color: red;
}
.root {
    -st-states: disabled, size(enum(small, large));
    color: value(color);
}
.label {
    font-size: value(size);
}
.icon {}
"#;

/// A page composing the button.
pub const PAGE: &str = r#"
:import {
    -st-from: "./button.st.css";
    -st-default: Button;
    -st-named: color;
}
.root {}
.cta {
    -st-extends: Button;
    background: value(color);
}
.cta:disabled {}
.cta::label {
    color: blue;
}
Button:size(large) {}
"#;

pub const CYCLIC_VARS: &str = ":vars { a: value(b); b: value(a); }\n.c { x: value(a); }";

pub const CIRCULAR_MIXINS: &str = ".a { prop: green; -st-mixin: b; }\n.b { -st-mixin: a; }";
