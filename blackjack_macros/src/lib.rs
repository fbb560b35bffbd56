use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use quote::ToTokens;
use syn::{parse::Parser, punctuated::Punctuated, Path, Token};

/// This macro is added before a method of a state machine struct (`Round` or
/// `Session`) in the impl block. The struct must have a `phase` field whose
/// type implements `Display`, and the method must return
/// `Result<_, GameError>`.
///
/// The method first checks that the current phase is one of the phases in the
/// attribute. If not, it returns `GameError::IllegalAction` naming the method,
/// the allowed phases and the current phase, before any other statement runs.
///
/// For example, `#[allowed_phase(RoundPhase::PlayerTurn)]` makes `hit` fail
/// unless the round is in `PlayerTurn`. Several phases may be listed:
/// `#[allowed_phase(SessionPhase::Betting, SessionPhase::RoundOver)]`.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    match expand_allowed_phase(attr.into(), item.into()) {
        Ok(ts) => ts.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_allowed_phase(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    let phases = Punctuated::<Path, Token![,]>::parse_terminated.parse2(attr)?;
    if phases.is_empty() {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "allowed_phase needs at least one phase",
        ));
    }
    let phases: Vec<&Path> = phases.iter().collect();

    let allowed = phases
        .iter()
        .filter_map(|path| path.segments.last())
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join(" or ");

    let mut ast: syn::ImplItemFn = syn::parse2(item)?;
    let action = ast.sig.ident.to_string();

    let early_return: syn::Stmt = syn::parse_quote! {
        if !matches!(self.phase, #(#phases)|*) {
            return ::core::result::Result::Err(crate::GameError::IllegalAction {
                action: #action,
                reason: format!("only allowed in {} phase, not in {}", #allowed, self.phase),
            });
        }
    };
    ast.block.stmts.insert(0, early_return);
    Ok(ast.into_token_stream())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn guard_is_inserted_first() {
        let attr = quote! { RoundPhase::PlayerTurn };
        let item = quote! {
            pub fn hit(&mut self) -> Result<(), GameError> {
                self.cards += 1;
                Ok(())
            }
        };
        let expanded = expand_allowed_phase(attr, item).unwrap().to_string();
        let guard_at = expanded.find("matches !").unwrap();
        let body_at = expanded.find("self . cards").unwrap();
        assert!(guard_at < body_at);
        assert!(expanded.contains("\"hit\""));
        assert!(expanded.contains("RoundPhase :: PlayerTurn"));
    }

    #[test]
    fn multiple_phases_are_joined() {
        let attr = quote! { SessionPhase::Betting, SessionPhase::RoundOver };
        let item = quote! {
            fn start(&mut self) -> Result<(), GameError> { Ok(()) }
        };
        let expanded = expand_allowed_phase(attr, item).unwrap().to_string();
        assert!(expanded.contains("SessionPhase :: Betting | SessionPhase :: RoundOver"));
        assert!(expanded.contains("\"Betting or RoundOver\""));
    }

    #[test]
    fn empty_attribute_is_rejected() {
        let item = quote! {
            fn start(&mut self) -> Result<(), GameError> { Ok(()) }
        };
        assert!(expand_allowed_phase(TokenStream2::new(), item).is_err());
    }
}
