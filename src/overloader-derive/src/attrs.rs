use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Error as SynError, Fields, Ident, Result as SynResult};

#[derive(Debug)]
pub struct TargetData {
    pub after: Option<Ident>,
    pub fields: Vec<FieldData>,
}

#[derive(Debug)]
pub struct FieldData {
    pub ident: Ident,
    pub request: String,
    pub required: bool,
}

pub fn parse_target(input: &DeriveInput) -> SynResult<TargetData> {
    let Data::Struct(data) = &input.data else {
        return Err(SynError::new(
            input.span(),
            "`#[derive(Target)]` only supports structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(SynError::new(
            data.fields.span(),
            "`#[derive(Target)]` requires named fields",
        ));
    };

    let after = parse_container_attributes(&input.attrs)?;
    let mut res = Vec::new();
    for field in &fields.named {
        let Some(ident) = field.ident.clone() else {
            unreachable!("named fields should have an identifier");
        };
        let request = ident.to_string();
        let attr = parse_field_attributes(&field.attrs)?;

        // Underscored fields are private state, never requested.
        if attr.skip || request.starts_with('_') {
            if attr.required {
                return Err(SynError::new(
                    field.span(),
                    "a skipped field can't be `required`",
                ));
            }
            continue;
        }
        res.push(FieldData {
            ident,
            request,
            required: attr.required,
        });
    }

    Ok(TargetData { after, fields: res })
}

fn parse_container_attributes(attrs: &[Attribute]) -> SynResult<Option<Ident>> {
    let mut after = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("target")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("after") {
                if after.is_some() {
                    return Err(meta.error("duplicated `after` hook"));
                }
                after = Some(meta.value()?.parse::<Ident>()?);
                Ok(())
            } else {
                Err(meta.error("expects `after = method`"))
            }
        })?;
    }
    Ok(after)
}

#[derive(Debug, Default)]
struct FieldAttributes {
    skip: bool,
    required: bool,
}

fn parse_field_attributes(attrs: &[Attribute]) -> SynResult<FieldAttributes> {
    let mut res = FieldAttributes::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("target")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                res.skip = true;
                Ok(())
            } else if meta.path.is_ident("required") {
                res.required = true;
                Ok(())
            } else {
                Err(meta.error("expects `skip` or `required`"))
            }
        })?;
    }
    Ok(res)
}
