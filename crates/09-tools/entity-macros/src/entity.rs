//! 实体声明宏实现

use crate::utils::{is_attribute, registration_fn_name};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    ext::IdentExt, parse::Parse, parse::ParseStream, parse_quote, punctuated::Punctuated,
    DeriveInput, Ident, LitStr, Result, Token, Type,
};

/// 按声明顺序记录的契约
#[derive(Debug, Clone)]
pub enum ContractArg {
    /// `key = Type`，即 `Entity<Type>`
    Key(Type),
    /// `implements = Type`
    Implements(Type),
}

/// 实体配置参数
#[derive(Debug, Clone, Default)]
pub struct EntityArgs {
    /// 契约，按声明顺序
    pub contracts: Vec<ContractArg>,
    /// 基类型，按声明顺序
    pub bases: Vec<Type>,
    /// 是否为抽象类型
    pub is_abstract: bool,
    /// 是否带有排除标记
    pub not_mapped: bool,
    /// 自定义显示名称
    pub name: Option<String>,
}

impl EntityArgs {
    /// 声明的主键类型，按声明顺序
    pub fn keys(&self) -> Vec<&Type> {
        self.contracts
            .iter()
            .filter_map(|contract| match contract {
                ContractArg::Key(key) => Some(key),
                ContractArg::Implements(_) => None,
            })
            .collect()
    }

    /// 实现 `Entity<K>` 的主键类型
    ///
    /// 未声明主键但声明了基类型时，沿用第一个基类型的 `PrimaryKey::Key`，
    /// 此时基类型必须恰好声明一个主键。
    pub fn effective_keys(&self) -> Vec<Type> {
        match self.bases.first() {
            Some(base) if self.inherits_key() => {
                vec![parse_quote!(<#base as ::entity_automapping::PrimaryKey>::Key)]
            }
            _ => self.keys().into_iter().cloned().collect(),
        }
    }

    /// 主键是否继承自基类型
    pub fn inherits_key(&self) -> bool {
        self.keys().is_empty() && !self.bases.is_empty()
    }
}

enum EntityArg {
    Key(Type),
    Implements(Type),
    Extends(Type),
    Abstract,
    NotMapped,
    Name(LitStr),
}

impl Parse for EntityArg {
    fn parse(input: ParseStream) -> Result<Self> {
        // `abstract` 是保留关键字，需要用 parse_any
        let ident = Ident::parse_any(input)?;

        match ident.to_string().as_str() {
            "abstract" => Ok(EntityArg::Abstract),
            "not_mapped" => Ok(EntityArg::NotMapped),
            "key" => {
                input.parse::<Token![=]>()?;
                Ok(EntityArg::Key(input.parse()?))
            }
            "implements" => {
                input.parse::<Token![=]>()?;
                Ok(EntityArg::Implements(input.parse()?))
            }
            "extends" => {
                input.parse::<Token![=]>()?;
                Ok(EntityArg::Extends(input.parse()?))
            }
            "name" => {
                input.parse::<Token![=]>()?;
                Ok(EntityArg::Name(input.parse()?))
            }
            other => Err(syn::Error::new(
                ident.span(),
                format!(
                    "未知的 #[entity] 参数 `{}`，可用参数: key, implements, extends, abstract, not_mapped, name",
                    other
                ),
            )),
        }
    }
}

impl Parse for EntityArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = EntityArgs::default();

        let parsed = Punctuated::<EntityArg, Token![,]>::parse_terminated(input)?;

        for arg in parsed {
            match arg {
                EntityArg::Key(ty) => args.contracts.push(ContractArg::Key(ty)),
                EntityArg::Implements(ty) => args.contracts.push(ContractArg::Implements(ty)),
                EntityArg::Extends(ty) => args.bases.push(ty),
                EntityArg::Abstract => args.is_abstract = true,
                EntityArg::NotMapped => args.not_mapped = true,
                EntityArg::Name(lit) => args.name = Some(lit.value()),
            }
        }

        Ok(args)
    }
}

/// 实现 #[entity] 宏
pub fn entity_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut entity_args = if args.is_empty() {
        EntityArgs::default()
    } else {
        match syn::parse2::<EntityArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error(),
        }
    };

    let mut item = match syn::parse2::<DeriveInput>(input) {
        Ok(item) => item,
        Err(e) => return e.to_compile_error(),
    };

    // 写在后面的 #[not_mapped] 由这里吸收，NotMapped 只实现一次
    let attr_count = item.attrs.len();
    item.attrs.retain(|attr| !is_attribute(attr, "not_mapped"));
    if item.attrs.len() != attr_count {
        entity_args.not_mapped = true;
    }

    match expand_entity(&entity_args, &item) {
        Ok(expanded) => expanded,
        Err(e) => e.to_compile_error(),
    }
}

fn expand_entity(args: &EntityArgs, item: &DeriveInput) -> Result<TokenStream> {
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "#[entity] 不支持泛型类型，请为具体类型声明",
        ));
    }

    let ident = &item.ident;
    let keys = args.effective_keys();

    let entity_impls = keys.iter().map(|key| {
        quote! {
            impl ::entity_automapping::Entity<#key> for #ident {}
        }
    });

    let primary_key_impl = match keys.as_slice() {
        [key] => quote! {
            impl ::entity_automapping::PrimaryKey for #ident {
                type Key = #key;
            }
        },
        _ => quote! {},
    };

    let not_mapped_impl = if args.not_mapped {
        quote! {
            impl ::entity_automapping::NotMapped for #ident {}
        }
    } else {
        quote! {}
    };

    let registration_code = generate_registration_code(args, ident);

    Ok(quote! {
        #item

        #(#entity_impls)*

        #primary_key_impl

        #not_mapped_impl

        #registration_code
    })
}

/// 生成描述符构建链，顺序与声明顺序一致
fn descriptor_chain(args: &EntityArgs, ident: &Ident) -> Vec<TokenStream> {
    let mut chain = Vec::new();

    if let Some(name) = &args.name {
        chain.push(quote! { .named(#name) });
    }
    if args.is_abstract {
        chain.push(quote! { .abstract_type() });
    }
    if args.not_mapped {
        chain.push(quote! { .not_mapped() });
    }

    for base in &args.bases {
        chain.push(quote! { .extends::<#base>() });
    }

    for contract in &args.contracts {
        chain.push(match contract {
            ContractArg::Key(key) => quote! { .with_identity::<#key>() },
            ContractArg::Implements(contract) => quote! {
                .implements(::entity_automapping::__private::ContractImpl::new(
                    ::entity_automapping::__private::ContractId::of::<#contract>(),
                ))
            },
        });
    }

    // 继承的标识契约已由基类型描述符提供，这里只补仓储工厂
    // 抽象类型不会被注册仓储
    if !args.is_abstract {
        for key in args.effective_keys() {
            chain.push(quote! {
                .with_repository(::entity_automapping::__private::ef_repository_factory::<#ident, #key>())
            });
        }
    }

    chain
}

/// 生成实体自动注册代码
fn generate_registration_code(args: &EntityArgs, ident: &Ident) -> TokenStream {
    let registration_fn_name = registration_fn_name(ident);
    let chain = descriptor_chain(args, ident);

    quote! {
        // 使用 ctor 在程序启动时自动注册实体描述符
        #[ctor::ctor]
        fn #registration_fn_name() {
            let descriptor = ::entity_automapping::__private::EntityDescriptor::new::<#ident>(
                ::entity_automapping::__private::ModuleInfo::new(
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION"),
                ),
            )
            #(#chain)*;

            ::entity_automapping::__private::submit_descriptor(descriptor);
        }
    }
}
