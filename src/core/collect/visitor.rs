//! AST walk producing candidates and the structural facts the rewriter needs.

use std::collections::HashSet;

use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{
    ArrayLit, ArrowExpr, BinExpr, BinaryOp, BlockStmt, BlockStmtOrExpr, CallExpr, Callee, Decl,
    Expr, ExprStmt, FnDecl, FnExpr, Function, Ident, ImportDecl, ImportSpecifier, JSXAttr,
    JSXAttrName, JSXAttrValue, JSXElement, JSXElementName, JSXFragment, JSXMemberExpr, JSXObject,
    JSXText, KeyValueProp, Lit, MemberExpr, MemberProp, Module, ModuleExportName, ModuleItem,
    ObjectPatProp, Pat, PropName, Stmt, Str, SwitchCase, TsEnumDecl, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::node::{Ancestor, Candidate, TextNode, TextNodeKind, is_component_name};
use crate::core::parsers::jsx::ParsedJSX;
use crate::utils::normalize_whitespace;

/// Callees wrapping a component definition (`memo(() => ...)`).
pub const COMPONENT_WRAPPERS: &[&str] = &["memo", "forwardRef", "React.memo", "React.forwardRef"];

/// Elements whose children are code, not text.
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

/// An import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    pub source: String,
    /// Whether the declaration imports the translation hook by name.
    pub imports_hook: bool,
    /// Local names bound by the declaration; empty for side-effect imports.
    pub locals: Vec<String>,
    /// Byte range of the declaration.
    pub range: (usize, usize),
}

/// Where a component's body starts, used to inject the lookup binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentBody {
    /// `{ ... }` body. `open` is the offset of the brace, `first_stmt` the
    /// offset of the first statement if there is one.
    Block {
        open: usize,
        first_stmt: Option<usize>,
    },
    /// Expression-bodied arrow function; range of the expression.
    Expr { start: usize, end: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    pub name: String,
    pub body: ComponentBody,
    /// Whether the lookup function is already bound, as a parameter or by a
    /// top-level declaration of the body.
    pub has_binding: bool,
}

/// Everything collected from one file in a single walk.
#[derive(Debug, Default)]
pub struct CollectedFile {
    pub candidates: Vec<Candidate>,
    pub imports: Vec<ImportInfo>,
    pub components: Vec<ComponentInfo>,
    /// Directive prologue values (`use client`, `use server`).
    pub directives: Vec<String>,
    /// Offset just past the last directive statement.
    pub prologue_end: Option<usize>,
    /// Keys passed as string literals to the lookup function.
    pub referenced_keys: Vec<String>,
    /// Every identifier used outside import declarations.
    pub identifiers: HashSet<String>,
}

impl CollectedFile {
    pub fn has_directive(&self, directive: &str) -> bool {
        self.directives.iter().any(|d| d == directive)
    }
}

pub struct Collector<'a> {
    parsed: &'a ParsedJSX,
    hook_name: &'a str,
    lookup_function: &'a str,
    ancestors: Vec<Ancestor>,
    component_stack: Vec<usize>,
    out: CollectedFile,
}

impl<'a> Collector<'a> {
    pub fn new(parsed: &'a ParsedJSX, hook_name: &'a str, lookup_function: &'a str) -> Self {
        Self {
            parsed,
            hook_name,
            lookup_function,
            ancestors: Vec::new(),
            component_stack: Vec::new(),
            out: CollectedFile::default(),
        }
    }

    pub fn collect(mut self) -> CollectedFile {
        let module = &self.parsed.module;
        self.visit_module(module);
        self.out
    }

    fn with_ancestor(&mut self, ancestor: Ancestor, f: impl FnOnce(&mut Self)) {
        self.ancestors.push(ancestor);
        f(self);
        self.ancestors.pop();
    }

    fn push_candidate(&mut self, kind: TextNodeKind, value: String, span: Span) {
        self.out.candidates.push(Candidate {
            node: TextNode {
                kind,
                value,
                line: self.parsed.line(span.lo),
                span,
            },
            ancestors: self.ancestors.clone(),
            component: self.component_stack.last().copied(),
        });
    }

    fn push_str(&mut self, s: &Str, kind: TextNodeKind) {
        if let Some(value) = s.value.as_str() {
            self.push_candidate(kind, value.to_string(), s.span);
        }
    }

    /// Visit a function, registering it as a component when `name` looks
    /// like one. Only the body is inside the component: parameter defaults
    /// are evaluated before any binding in the body exists.
    fn visit_function_like(&mut self, name: Option<String>, function: FunctionRef<'_>) {
        let component = name.as_deref().is_some_and(is_component_name);
        let registered = match (&name, component) {
            (Some(name), true) => self.register_component(name, function),
            _ => None,
        };

        self.with_ancestor(Ancestor::Function { name, component }, |this| {
            function.visit_params(this);
            if let Some(index) = registered {
                this.component_stack.push(index);
            }
            function.visit_body(this);
            if registered.is_some() {
                this.component_stack.pop();
            }
        });
    }

    fn register_component(&mut self, name: &str, function: FunctionRef<'_>) -> Option<usize> {
        let (body, declared) = match function.body() {
            FunctionBody::Block(block) => (
                ComponentBody::Block {
                    open: self.parsed.offset(block.span.lo),
                    first_stmt: block
                        .stmts
                        .first()
                        .map(|stmt| self.parsed.offset(stmt.span().lo)),
                },
                self.declares_lookup(&block.stmts),
            ),
            FunctionBody::Expr(expr) => {
                let (start, end) = self.parsed.range(expr.span());
                (ComponentBody::Expr { start, end }, false)
            }
            FunctionBody::None => return None,
        };

        self.out.components.push(ComponentInfo {
            name: name.to_string(),
            body,
            has_binding: declared || function.binds_param(self.lookup_function),
        });
        Some(self.out.components.len() - 1)
    }

    fn declares_lookup(&self, stmts: &[Stmt]) -> bool {
        stmts.iter().any(|stmt| {
            let Stmt::Decl(Decl::Var(var)) = stmt else {
                return false;
            };
            var.decls
                .iter()
                .any(|decl| pat_binds(&decl.name, self.lookup_function))
        })
    }
}

#[derive(Clone, Copy)]
enum FunctionBody<'n> {
    Block(&'n BlockStmt),
    Expr(&'n Expr),
    None,
}

#[derive(Clone, Copy)]
enum FunctionRef<'n> {
    Function(&'n Function),
    Arrow(&'n ArrowExpr),
}

impl<'n> FunctionRef<'n> {
    fn body(self) -> FunctionBody<'n> {
        match self {
            Self::Function(function) => match &function.body {
                Some(block) => FunctionBody::Block(block),
                None => FunctionBody::None,
            },
            Self::Arrow(arrow) => match &*arrow.body {
                BlockStmtOrExpr::BlockStmt(block) => FunctionBody::Block(block),
                BlockStmtOrExpr::Expr(expr) => FunctionBody::Expr(expr),
            },
        }
    }

    fn binds_param(self, name: &str) -> bool {
        match self {
            Self::Function(function) => function.params.iter().any(|p| pat_binds(&p.pat, name)),
            Self::Arrow(arrow) => arrow.params.iter().any(|p| pat_binds(p, name)),
        }
    }

    fn visit_params(self, v: &mut Collector<'_>) {
        match self {
            Self::Function(function) => function.params.visit_with(v),
            Self::Arrow(arrow) => arrow.params.visit_with(v),
        }
    }

    fn visit_body(self, v: &mut Collector<'_>) {
        match self {
            Self::Function(function) => function.body.visit_with(v),
            Self::Arrow(arrow) => arrow.body.visit_with(v),
        }
    }

    /// The component passed to a wrapper call (`memo(() => ...)`).
    fn wrapped_by(call: &'n CallExpr) -> Option<Self> {
        if !COMPONENT_WRAPPERS.contains(&callee_name(&call.callee).as_str()) {
            return None;
        }
        match call.args.first().map(|arg| &*arg.expr) {
            Some(Expr::Arrow(arrow)) => Some(Self::Arrow(arrow)),
            Some(Expr::Fn(fn_expr)) => Some(Self::Function(&fn_expr.function)),
            _ => None,
        }
    }
}

fn pat_binds(pat: &Pat, name: &str) -> bool {
    match pat {
        Pat::Ident(ident) => ident.id.sym == *name,
        Pat::Object(obj) => obj.props.iter().any(|prop| match prop {
            ObjectPatProp::Assign(assign) => assign.key.id.sym == *name,
            ObjectPatProp::KeyValue(kv) => pat_binds(&kv.value, name),
            ObjectPatProp::Rest(rest) => pat_binds(&rest.arg, name),
        }),
        Pat::Array(arr) => arr.elems.iter().flatten().any(|p| pat_binds(p, name)),
        Pat::Assign(assign) => pat_binds(&assign.left, name),
        Pat::Rest(rest) => pat_binds(&rest.arg, name),
        _ => false,
    }
}

fn jsx_element_name(name: &JSXElementName) -> String {
    match name {
        JSXElementName::Ident(ident) => ident.sym.to_string(),
        JSXElementName::JSXMemberExpr(member) => jsx_member_name(member),
        JSXElementName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

fn jsx_member_name(member: &JSXMemberExpr) -> String {
    let object = match &member.obj {
        JSXObject::Ident(ident) => ident.sym.to_string(),
        JSXObject::JSXMemberExpr(inner) => jsx_member_name(inner),
    };
    format!("{}.{}", object, member.prop.sym)
}

fn jsx_attr_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

/// Dotted path of a callee (`t`, `console.log`, `React.memo`).
fn callee_name(callee: &Callee) -> String {
    match callee {
        Callee::Expr(expr) => expr_path(expr).unwrap_or_default(),
        Callee::Import(_) => "import".to_string(),
        Callee::Super(_) => "super".to_string(),
    }
}

fn expr_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => {
            let object = expr_path(&member.obj)?;
            match &member.prop {
                MemberProp::Ident(prop) => Some(format!("{}.{}", object, prop.sym)),
                _ => None,
            }
        }
        Expr::Paren(paren) => expr_path(&paren.expr),
        _ => None,
    }
}

fn prop_key(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(str::to_string),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}

fn is_string_statement(stmt: &ExprStmt) -> bool {
    matches!(&*stmt.expr, Expr::Lit(Lit::Str(_)))
}

impl<'a> Visit for Collector<'a> {
    fn visit_module(&mut self, node: &Module) {
        let mut in_prologue = true;
        for item in &node.body {
            if in_prologue {
                if let ModuleItem::Stmt(Stmt::Expr(stmt)) = item
                    && let Expr::Lit(Lit::Str(s)) = &*stmt.expr
                {
                    if let Some(value) = s.value.as_str() {
                        self.out.directives.push(value.to_string());
                    }
                    self.out.prologue_end = Some(self.parsed.offset(stmt.span.hi));
                    continue;
                }
                in_prologue = false;
            }
            item.visit_with(self);
        }
    }

    fn visit_import_decl(&mut self, node: &ImportDecl) {
        let imports_hook = node.specifiers.iter().any(|spec| match spec {
            ImportSpecifier::Named(named) => {
                let imported = match &named.imported {
                    Some(ModuleExportName::Ident(ident)) => ident.sym == *self.hook_name,
                    Some(ModuleExportName::Str(s)) => s.value.as_str() == Some(self.hook_name),
                    None => named.local.sym == *self.hook_name,
                };
                imported && named.local.sym == *self.hook_name
            }
            _ => false,
        });

        let locals = node
            .specifiers
            .iter()
            .map(|spec| match spec {
                ImportSpecifier::Named(named) => named.local.sym.to_string(),
                ImportSpecifier::Default(default) => default.local.sym.to_string(),
                ImportSpecifier::Namespace(ns) => ns.local.sym.to_string(),
            })
            .collect();

        self.out.imports.push(ImportInfo {
            source: node.src.value.as_str().unwrap_or_default().to_string(),
            imports_hook,
            locals,
            range: self.parsed.range(node.span),
        });
    }

    fn visit_expr_stmt(&mut self, node: &ExprStmt) {
        // A bare string statement is a directive or dead code, never UI text.
        if is_string_statement(node) {
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_expr(&mut self, node: &Expr) {
        if let Expr::Lit(Lit::Str(s)) = node {
            self.push_str(s, TextNodeKind::StringLiteral);
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        let name = jsx_element_name(&node.opening.name);
        let raw_text = RAW_TEXT_ELEMENTS.contains(&name.as_str());

        self.with_ancestor(Ancestor::Element { name }, |this| {
            node.opening.visit_with(this);
            if !raw_text {
                node.children.visit_with(this);
            }
        });
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        self.with_ancestor(
            Ancestor::Element {
                name: String::new(),
            },
            |this| node.children.visit_with(this),
        );
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        let value = normalize_whitespace(&node.value);
        if value.is_empty() {
            return;
        }

        // The span covers surrounding whitespace; narrow it to the text itself
        // so a rewrite keeps the original layout around it.
        let raw: &str = &node.raw;
        let leading = raw.len() - raw.trim_start().len();
        let lo = node.span.lo + BytePos(leading as u32);
        let hi = lo + BytePos(raw.trim().len() as u32);

        self.push_candidate(TextNodeKind::JsxText, value, Span::new(lo, hi));
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let name = jsx_attr_name(&node.name);
        self.with_ancestor(Ancestor::Attribute { name }, |this| match &node.value {
            Some(JSXAttrValue::Str(s)) => this.push_str(s, TextNodeKind::AttributeValue),
            Some(value) => value.visit_with(this),
            None => {}
        });
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        let (Pat::Ident(binding), Some(init)) = (&node.name, &node.init) else {
            node.init.visit_with(self);
            return;
        };
        let name = binding.id.sym.to_string();

        self.with_ancestor(Ancestor::Declarator { name: name.clone() }, |this| {
            match &**init {
                Expr::Arrow(arrow) => this.visit_function_like(Some(name), FunctionRef::Arrow(arrow)),
                Expr::Fn(fn_expr) => {
                    this.visit_function_like(Some(name), FunctionRef::Function(&fn_expr.function))
                }
                Expr::Call(call) => match FunctionRef::wrapped_by(call) {
                    Some(function) => {
                        call.callee.visit_with(this);
                        let callee = callee_name(&call.callee);
                        this.with_ancestor(Ancestor::Call { callee }, |this| {
                            this.visit_function_like(Some(name), function);
                            call.args.iter().skip(1).for_each(|arg| arg.visit_with(this));
                        });
                    }
                    None => call.visit_with(this),
                },
                other => other.visit_with(this),
            }
        });
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        let name = node.ident.sym.to_string();
        self.visit_function_like(Some(name), FunctionRef::Function(&node.function));
    }

    fn visit_fn_expr(&mut self, node: &FnExpr) {
        let name = node.ident.as_ref().map(|i| i.sym.to_string());
        self.visit_function_like(name, FunctionRef::Function(&node.function));
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.visit_function_like(None, FunctionRef::Arrow(node));
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        let callee = callee_name(&node.callee);

        if callee == self.lookup_function
            && let Some(arg) = node.args.first()
            && let Expr::Lit(Lit::Str(s)) = &*arg.expr
            && let Some(key) = s.value.as_str()
        {
            self.out.referenced_keys.push(key.to_string());
        }

        node.callee.visit_with(self);
        self.with_ancestor(Ancestor::Call { callee }, |this| {
            node.args.visit_with(this)
        });
    }

    fn visit_key_value_prop(&mut self, node: &KeyValueProp) {
        match prop_key(&node.key) {
            Some(key) => self.with_ancestor(Ancestor::Property { key }, |this| {
                node.value.visit_with(this)
            }),
            None => node.value.visit_with(self),
        }
    }

    fn visit_array_lit(&mut self, node: &ArrayLit) {
        self.with_ancestor(Ancestor::Array, |this| node.visit_children_with(this));
    }

    fn visit_bin_expr(&mut self, node: &BinExpr) {
        let comparison = matches!(
            node.op,
            BinaryOp::EqEqEq | BinaryOp::NotEqEq | BinaryOp::EqEq | BinaryOp::NotEq | BinaryOp::In
        );
        if comparison {
            self.with_ancestor(Ancestor::Comparison, |this| node.visit_children_with(this));
        } else {
            node.visit_children_with(self);
        }
    }

    fn visit_switch_case(&mut self, node: &SwitchCase) {
        self.with_ancestor(Ancestor::Comparison, |this| node.test.visit_with(this));
        node.cons.visit_with(self);
    }

    fn visit_member_expr(&mut self, node: &MemberExpr) {
        // Computed member keys (`styles["card"]`) are lookups, not text.
        node.obj.visit_with(self);
    }

    fn visit_ts_enum_decl(&mut self, _node: &TsEnumDecl) {}

    fn visit_ident(&mut self, node: &Ident) {
        self.out.identifiers.insert(node.sym.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parsers::jsx::parse_jsx_source;
    use pretty_assertions::assert_eq;

    fn collect(code: &str) -> CollectedFile {
        let parsed = parse_jsx_source(code.to_string(), "test.tsx").unwrap();
        Collector::new(&parsed, "useTranslation", "t").collect()
    }

    fn values(file: &CollectedFile) -> Vec<&str> {
        file.candidates
            .iter()
            .map(|c| c.node.value.as_str())
            .collect()
    }

    #[test]
    fn test_collects_text_attributes_and_literals() {
        let file = collect(
            r#"export function Hero() {
    const label = "Read more";
    return (
        <div className="text-lg">
            <h1>
                Welcome to our
                amazing platform
            </h1>
            <input placeholder="Enter your email" />
        </div>
    );
}
"#,
        );

        assert_eq!(
            values(&file),
            vec![
                "Read more",
                "text-lg",
                "Welcome to our amazing platform",
                "Enter your email"
            ]
        );

        let heading = &file.candidates[2];
        assert_eq!(heading.node.kind, TextNodeKind::JsxText);
        assert_eq!(heading.node.line, 6);
        assert_eq!(heading.enclosing_element(), Some("h1"));
        assert_eq!(heading.component, Some(0));

        let placeholder = &file.candidates[3];
        assert_eq!(placeholder.node.kind, TextNodeKind::AttributeValue);
        assert_eq!(placeholder.attribute_name(), Some("placeholder"));
    }

    #[test]
    fn test_jsx_text_span_excludes_whitespace() {
        let code = "const A = () => <p>\n    Hello   there\n</p>;";
        let parsed = parse_jsx_source(code.to_string(), "a.tsx").unwrap();
        let file = Collector::new(&parsed, "useTranslation", "t").collect();

        let (lo, hi) = parsed.range(file.candidates[0].node.span);
        assert_eq!(&code[lo..hi], "Hello   there");
        assert_eq!(file.candidates[0].node.value, "Hello there");
    }

    #[test]
    fn test_non_expression_strings_are_not_candidates() {
        let file = collect(
            r#""use client";
import { Button } from "@/components/button";
type Variant = "primary" | "secondary";
enum Size { Small = "sm" }
const styles = { "card-title": 1 };
function f() {
    "use strict";
    return styles["card-title"];
}
"#,
        );

        assert!(file.candidates.is_empty(), "got {:?}", values(&file));
        assert_eq!(file.directives, vec!["use client"]);
        let end = file.prologue_end.unwrap();
        assert!(end >= "\"use client\"".len());
        assert_eq!(file.imports.len(), 1);
        assert_eq!(file.imports[0].source, "@/components/button");
    }

    #[test]
    fn test_components_and_bindings() {
        let file = collect(
            r#"import { useTranslation } from "react-i18next";

export function Hero() {
    const { t } = useTranslation();
    return <h1>{t("hero.title")}</h1>;
}

const Footer = () => <p>Made with care</p>;

const Card = memo(function Card() {
    return <span>Card body</span>;
});

function helper() {
    return "Not a component";
}
"#,
        );

        let names: Vec<&str> = file.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Hero", "Footer", "Card"]);
        assert!(file.components[0].has_binding);
        assert!(matches!(file.components[1].body, ComponentBody::Expr { .. }));
        assert!(file.imports[0].imports_hook);
        assert_eq!(file.referenced_keys, vec!["hero.title"]);

        let helper = file
            .candidates
            .iter()
            .find(|c| c.node.value == "Not a component")
            .unwrap();
        assert_eq!(helper.component, None);

        let footer = file
            .candidates
            .iter()
            .find(|c| c.node.value == "Made with care")
            .unwrap();
        assert_eq!(footer.component, Some(1));
    }

    #[test]
    fn test_lookup_bound_by_parameters() {
        let file = collect(
            r#"import i18next, { Trans as T } from "i18next";
import "./i18n";

function Row({ t }) {
    return <p>{i18next.language}</p>;
}
const Cell = ([first, t = fallback]) => <td>{first}</td>;
const Plain = (props) => <td>{props.label}</td>;
"#,
        );

        let bindings: Vec<(&str, bool)> = file
            .components
            .iter()
            .map(|c| (c.name.as_str(), c.has_binding))
            .collect();
        assert_eq!(
            bindings,
            vec![("Row", true), ("Cell", true), ("Plain", false)]
        );

        assert_eq!(file.imports[0].locals, vec!["i18next", "T"]);
        assert!(file.imports[1].locals.is_empty());
        assert!(file.identifiers.contains("i18next"));
        assert!(!file.identifiers.contains("T"));
    }

    #[test]
    fn test_parameter_defaults_are_outside_the_component() {
        let file = collect(
            r#"function Banner({ title = "Limited offer" }) {
    return <p>{title}</p>;
}
"#,
        );

        assert_eq!(values(&file), vec!["Limited offer"]);
        assert_eq!(file.candidates[0].component, None);
        assert_eq!(file.components.len(), 1);
    }

    #[test]
    fn test_ancestry_of_nested_literals() {
        let file = collect(
            r#"function Features() {
    const features = [{ title: "Fast builds", icon: "bolt" }];
    if (status === "loading") return null;
    return <Tooltip content={<span>Hint text</span>} />;
}
"#,
        );

        let title = &file.candidates[0];
        assert_eq!(title.direct_property(), Some("title"));
        assert!(title.has_ancestor(|a| matches!(a, Ancestor::Array)));
        assert!(title.has_ancestor(
            |a| matches!(a, Ancestor::Declarator { name } if name == "features")
        ));

        let loading = file
            .candidates
            .iter()
            .find(|c| c.node.value == "loading")
            .unwrap();
        assert_eq!(loading.parent(), Some(&Ancestor::Comparison));

        let hint = file
            .candidates
            .iter()
            .find(|c| c.node.value == "Hint text")
            .unwrap();
        assert_eq!(hint.attribute_name(), None);
        assert_eq!(hint.enclosing_element(), Some("span"));
    }

    #[test]
    fn test_style_children_are_skipped() {
        let file = collect(r#"const A = () => <style>{".title { color: red; }"}</style>;"#);
        assert!(file.candidates.is_empty());
    }
}
