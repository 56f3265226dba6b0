//! 排除标记宏实现

use crate::utils::is_attribute;
use proc_macro2::{TokenStream, TokenTree};
use quote::quote;
use syn::{parse_quote, Attribute, DeriveInput, Meta};

/// 实现 #[not_mapped] 宏
pub fn not_mapped_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new_spanned(args, "#[not_mapped] 不接受参数").to_compile_error();
    }

    let mut item = match syn::parse2::<DeriveInput>(input) {
        Ok(item) => item,
        Err(e) => return e.to_compile_error(),
    };

    // 后面还有 #[entity] 时交给它生成 NotMapped 实现
    if let Some(attr) = item.attrs.iter_mut().find(|attr| is_attribute(attr, "entity")) {
        *attr = inject_not_mapped(attr);
        return quote! { #item };
    }

    let ident = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    quote! {
        #item

        impl #impl_generics ::entity_automapping::NotMapped for #ident #ty_generics #where_clause {}
    }
}

/// 在 `#[entity(...)]` 的参数末尾追加 `not_mapped`
fn inject_not_mapped(attr: &Attribute) -> Attribute {
    let path = attr.path().clone();
    let existing = match &attr.meta {
        Meta::List(list) => list.tokens.clone(),
        _ => TokenStream::new(),
    };

    let ends_with_comma = matches!(
        existing.clone().into_iter().last(),
        Some(TokenTree::Punct(punct)) if punct.as_char() == ','
    );

    let tokens = if existing.is_empty() || ends_with_comma {
        quote! { #existing not_mapped }
    } else {
        quote! { #existing, not_mapped }
    };

    parse_quote! { #[#path(#tokens)] }
}
