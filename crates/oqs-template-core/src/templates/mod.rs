//! Fragment templates and their rendering.
//!
//! Fragments live next to the host files they populate, under
//! `oqs-template/<host path>/<identifier>.fragment`, and are rendered at run time with
//! [Handlebars](https://handlebarsjs.com/) via [`renderer::TemplateRenderer`].
//!
//! ## Template variables
//!
//! Every fragment sees a single variable, `config`, holding the completed registry:
//! - `{{#each config.kems}}`: `family`, `name_group`, `oqs_alg`, `nid`, `nid_hybrid`,
//!   `bit_security`
//! - `{{#each config.sigs}}` / `{{#each variants}}`: `name`, `enable`, `oid`,
//!   `code_point`, `security`, `mix_with`
//!
//! Helpers: `{{upper x}}`, `{{lower x}}`, `{{replace x "-" "_"}}`.

pub mod fragment;
pub mod renderer;
