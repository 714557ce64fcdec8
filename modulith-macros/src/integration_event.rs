use crate::derive_utils::apply_derives;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, ItemStruct, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[integration_event] 宏实现
/// - 仅支持结构体（具名、tuple 或 unit）：集成事件是纯数据记录
/// - 合并/追加派生：Clone, PartialEq, (Debug 可控)
/// - 实现 `::modulith_core::integration_event::IntegrationEvent`，`NAME` 默认取类型名
/// - 参数：`#[integration_event(name = "...", debug = true|false)]`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as IntegrationEventAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st: ItemStruct = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(
                other.span(),
                "#[integration_event] only supports struct (events are plain data records)",
            )
            .to_compile_error()
            .into();
        }
    };

    let mut required: Vec<syn::Path> = vec![syn::parse_quote!(Clone), syn::parse_quote!(PartialEq)];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let name = cfg
        .name
        .unwrap_or_else(|| syn::LitStr::new(&ident.to_string(), ident.span()));
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let out = quote! {
        #st

        impl #impl_generics ::modulith_core::integration_event::IntegrationEvent
            for #ident #ty_generics #where_clause
        {
            const NAME: &'static str = #name;
        }
    };

    TokenStream::from(out)
}

// -------- parsing --------

struct IntegrationEventAttrConfig {
    name: Option<syn::LitStr>,
    derive_debug: Option<bool>,
}

impl Parse for IntegrationEventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self {
            name: None,
            derive_debug: None,
        };

        if input.is_empty() {
            return Ok(cfg);
        }

        let pairs: Punctuated<AttrElem, Token![,]> = Punctuated::parse_terminated(input)?;

        for elem in pairs {
            match elem {
                AttrElem::Name(key, lit) => {
                    if cfg.name.is_some() {
                        return Err(syn::Error::new(key.span(), "duplicate key 'name' in attribute"));
                    }
                    if lit.value().trim().is_empty() {
                        return Err(syn::Error::new(lit.span(), "'name' must not be empty"));
                    }
                    cfg.name = Some(lit);
                }
                AttrElem::Debug(key, b) => {
                    if cfg.derive_debug.is_some() {
                        return Err(syn::Error::new(key.span(), "duplicate key 'debug' in attribute"));
                    }
                    cfg.derive_debug = Some(b);
                }
            }
        }

        Ok(cfg)
    }
}

enum AttrElem {
    Name(syn::Ident, syn::LitStr),
    Debug(syn::Ident, bool),
}

impl Parse for AttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;
        let expr: syn::Expr = input.parse()?;

        match (key.to_string().as_str(), expr) {
            (
                "name",
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s),
                    ..
                }),
            ) => Ok(Self::Name(key, s)),
            (
                "debug",
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Bool(b),
                    ..
                }),
            ) => Ok(Self::Debug(key, b.value())),
            ("name", other) => Err(syn::Error::new(
                other.span(),
                "expected string literal for 'name'",
            )),
            ("debug", other) => Err(syn::Error::new(
                other.span(),
                "expected boolean literal for 'debug'",
            )),
            _ => Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'name' | 'debug'",
            )),
        }
    }
}
