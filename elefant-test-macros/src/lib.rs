use proc_macro::{Span, TokenStream};
use darling::ast::NestedMeta;
use darling::FromMeta;
use quote::{format_ident, quote};
use syn::{parse_macro_input, FnArg, Ident, ItemFn, Pat};

/// The Postgres versions a test can run against. Each version is expected to be
/// listening on its own port, `54xx` where `xx` is the major version.
const SUPPORTED_POSTGRES_VERSIONS: [i32; 5] = [12, 13, 14, 15, 16];

#[derive(Debug, FromMeta)]
enum DatabaseArg {
    Postgres(i32),
}

impl DatabaseArg {
    fn module_part(&self) -> String {
        match self {
            DatabaseArg::Postgres(v) => format!("postgres_{}", v),
        }
    }

    fn port(&self) -> Result<u16, darling::Error> {
        match self {
            DatabaseArg::Postgres(v) if SUPPORTED_POSTGRES_VERSIONS.contains(v) => Ok(5400 + *v as u16),
            DatabaseArg::Postgres(v) => Err(darling::Error::custom(format!("Unsupported postgres version {v}, expected one of {SUPPORTED_POSTGRES_VERSIONS:?}"))),
        }
    }
}

#[derive(Debug, FromMeta)]
struct PgTestArgs {
    #[darling(multiple, rename = "arg")]
    databases: Vec<DatabaseArg>,
}

impl PgTestArgs {
    fn test_name_prefix(&self) -> String {
        self.databases
            .iter()
            .map(|d| d.module_part())
            .collect::<Vec<_>>()
            .join("_")
    }
}

fn argument_ident(arg: &FnArg) -> Result<&Ident, darling::Error> {
    if let FnArg::Typed(typed) = arg {
        if let Pat::Ident(ident) = &*typed.pat {
            return Ok(&ident.ident);
        }
    }

    Err(darling::Error::custom("Only simple identifiers are supported as function arguments"))
}

/// Runs an async test function against a fresh database per argument.
///
/// ```ignore
/// #[pg_test(arg(postgres = 16))]
/// async fn reads_tables(helper: &TestHelper) { ... }
/// ```
///
/// The generated test is ignored unless the `pg_tests` feature of the calling crate is enabled.
#[proc_macro_attribute]
pub fn pg_test(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    match expand_pg_test(args, &input) {
        Ok(tokens) => tokens,
        Err(e) => TokenStream::from(e.write_errors()),
    }
}

fn expand_pg_test(args: TokenStream, input: &ItemFn) -> Result<TokenStream, darling::Error> {
    let attr_args = NestedMeta::parse_meta_list(args.into())?;
    let args = PgTestArgs::from_list(&attr_args)?;

    if input.sig.inputs.len() != args.databases.len() {
        return Err(darling::Error::custom(format!("Function is declared to have {} args, however attribute defines {} args", input.sig.inputs.len(), args.databases.len())));
    }

    let function_name = &input.sig.ident;
    let prefix = Ident::new(&args.test_name_prefix(), Span::call_site().into());
    let test_function_name = format_ident!("{prefix}_{function_name}");

    let mut create_helpers = Vec::with_capacity(args.databases.len());
    let mut stop_helpers = Vec::with_capacity(args.databases.len());
    let mut helper_idents = Vec::with_capacity(args.databases.len());

    for (database, arg) in args.databases.iter().zip(input.sig.inputs.iter()) {
        let port = database.port()?;
        let ident = argument_ident(arg)?;
        let helper_name = ident.to_string();

        create_helpers.push(quote! {
            let #ident = crate::test_helpers::get_test_helper_on_port(#helper_name, #port).await;
        });
        stop_helpers.push(quote! {
            #ident.stop().await;
        });
        helper_idents.push(ident.clone());
    }
    stop_helpers.reverse();

    let call = if input.sig.asyncness.is_some() {
        quote! { #function_name(#(&#helper_idents),*).await; }
    } else {
        quote! { #function_name(#(&#helper_idents),*); }
    };

    Ok(TokenStream::from(quote! {
        #input

        #[tokio::test]
        #[cfg_attr(not(feature = "pg_tests"), ignore = "requires running postgres instances, enable the pg_tests feature")]
        async fn #test_function_name() {
            #(#create_helpers)*

            #call

            #(#stop_helpers)*
        }
    }))
}
