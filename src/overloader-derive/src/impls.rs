use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::DeriveInput;

use crate::attrs::TargetData;

pub fn expand_implementation(input: &DeriveInput, data: TargetData) -> TokenStream2 {
    let self_type = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let requests = data.fields.iter().map(|field| &field.request);
    let answers = data.fields.iter().map(|field| {
        let ident = &field.ident;
        let request = &field.request;
        quote! {
            #request => ::overloader::target::Fillable::fill(&mut self.#ident, resource),
        }
    });
    let required = data
        .fields
        .iter()
        .filter(|field| field.required)
        .map(|field| {
            let ident = &field.ident;
            quote! { && ::overloader::target::Fillable::is_filled(&self.#ident) }
        });
    let after = data.after.map(|method| {
        quote! {
            fn after_injection(&mut self) {
                self.#method();
            }
        }
    });

    quote! {
        impl #impl_generics ::overloader::target::Target for #self_type #ty_generics #where_clause {
            fn resource_requests(&self) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![#(::std::string::String::from(#requests)),*]
            }

            #[allow(unused_variables)]
            fn answer_resource_request(
                &mut self,
                name: &str,
                resource: ::overloader::value::Value,
            ) -> bool {
                match name {
                    #(#answers)*
                    _ => false,
                }
            }

            fn check_requests_answered(&self) -> bool {
                true #(#required)*
            }

            #after
        }

        impl #impl_generics ::overloader::target::Component for #self_type #ty_generics #where_clause {
            fn as_target(&mut self) -> ::std::option::Option<&mut dyn ::overloader::target::Target> {
                ::std::option::Option::Some(self)
            }
        }
    }
}
