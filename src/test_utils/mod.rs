#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod upstream;

pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::assert_hx_redirect;
pub(crate) use upstream::{FakeUpstream, test_transactions};
