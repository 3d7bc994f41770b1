//! The standard tag catalogue.
//!
//! One [`ElementTemplate`] constant per tag. The table below is the only
//! place tag metadata lives; `void` marks elements that never take a closing
//! tag.

use super::template::ElementTemplate;

macro_rules! is_void {
    () => {
        false
    };
    (void) => {
        true
    };
}

macro_rules! catalogue {
    ($( $(#[$meta:meta])* $name:ident = $tag:literal $($void:ident)? ; )*) => {
        $(
            $(#[$meta])*
            pub const $name: ElementTemplate = ElementTemplate::new($tag, is_void!($($void)?));
        )*

        /// Every catalogue template, in table order.
        pub const ALL: &[ElementTemplate] = &[$($name),*];
    };
}

catalogue! {
    // Document root and metadata
    HTML = "html";
    BASE = "base" void;
    HEAD = "head";
    LINK = "link" void;
    META = "meta" void;
    STYLE = "style";
    TITLE = "title";

    // Content sectioning
    BODY = "body";
    ADDRESS = "address";
    ARTICLE = "article";
    ASIDE = "aside";
    FOOTER = "footer";
    HEADER = "header";
    H1 = "h1";
    H2 = "h2";
    H3 = "h3";
    H4 = "h4";
    H5 = "h5";
    H6 = "h6";
    MAIN = "main";
    NAV = "nav";
    SECTION = "section";

    // Text content
    HR = "hr" void;
    BLOCKQUOTE = "blockquote";
    DD = "dd";
    DIV = "div";
    DL = "dl";
    DT = "dt";
    FIGCAPTION = "figcaption";
    FIGURE = "figure";
    LI = "li";
    OL = "ol";
    P = "p";
    PRE = "pre";
    UL = "ul";

    // Inline text semantics
    BR = "br" void;
    A = "a";
    ABBR = "abbr";
    B = "b";
    BDI = "bdi";
    BDO = "bdo";
    CITE = "cite";
    CODE = "code";
    DATA = "data";
    EM = "em";
    I = "i";
    KBD = "kbd";
    MARK = "mark";
    Q = "q";
    RP = "rp";
    RT = "rt";
    RUBY = "ruby";
    S = "s";
    SAMP = "samp";
    SMALL = "small";
    SPAN = "span";
    STRONG = "strong";
    SUB = "sub";
    SUP = "sup";
    TIME = "time";
    U = "u";
    VAR = "var";
    WBR = "wbr" void;

    // Image and multimedia
    AREA = "area" void;
    IMG = "img" void;
    AUDIO = "audio";
    MAP = "map";
    TRACK = "track" void;
    VIDEO = "video";

    // Embedded content
    PORTAL = "portal" void;
    SOURCE = "source" void;
    IFRAME = "iframe" void;
    EMBED = "embed" void;
    OBJECT = "object";
    PARAM = "param" void;
    PICTURE = "picture";

    // Tables
    TABLE = "table";
    CAPTION = "caption";
    COL = "col" void;
    COLGROUP = "colgroup";
    THEAD = "thead";
    TBODY = "tbody";
    TFOOT = "tfoot";
    TR = "tr";
    TH = "th";
    TD = "td";

    // Forms
    FORM = "form";
    LABEL = "label";
    INPUT = "input" void;
    BUTTON = "button";
    SELECT = "select";
    OPTION = "option";
    TEXTAREA = "textarea";
    FIELDSET = "fieldset";
    LEGEND = "legend";

    // Scripting
    SCRIPT = "script";
    NOSCRIPT = "noscript";
    CANVAS = "canvas";
}

/// Find the catalogue template for `tag`.
pub fn lookup(tag: &str) -> Option<ElementTemplate> {
    ALL.iter().copied().find(|t| t.tag() == tag)
}
