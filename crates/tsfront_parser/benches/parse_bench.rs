use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_core::source::{SourceId, SourceText};
use tsfront_parser::{parse, Dialect, ParserOptions};
use tsfront_scanner::Scanner;

// A medium-size TypeScript module with declarations, generics and types.
const TYPESCRIPT_SOURCE: &str = r#"
// TypeScript interface definitions
interface User {
    id: number;
    name: string;
    email: string;
    age?: number;
    preferences: UserPreferences;
}

interface UserPreferences {
    theme: 'light' | 'dark';
    notifications: boolean;
    language: string;
}

// Type aliases
type UserID = number;
type UserMap = Map<UserID, User>;

// Class definition
class UserService {
    private users: UserMap;
    private nextId: UserID;

    constructor() {
        this.users = new Map();
        this.nextId = 1;
    }

    createUser(name: string, email: string): User {
        const user: User = {
            id: this.nextId++,
            name,
            email,
            preferences: {
                theme: 'light',
                notifications: true,
                language: 'en'
            }
        };
        this.users.set(user.id, user);
        return user;
    }

    getUserById(id: UserID): User | undefined {
        return this.users.get(id);
    }

    updateUser(id: UserID, updates: Partial<User>): boolean {
        const user = this.users.get(id);
        if (!user) return false;
        this.users.set(id, { ...user, ...updates });
        return true;
    }

    deleteUser(id: UserID): boolean {
        return this.users.delete(id);
    }

    getAllUsers(): User[] {
        return Array.from(this.users.values());
    }
}

// Function with generics
function filterUsers<T extends User>(
    users: T[],
    predicate: (user: T) => boolean
): T[] {
    return users.filter(predicate);
}

// Async function
async function fetchUserData(id: UserID): Promise<User | null> {
    const service = new UserService();
    return service.getUserById(id) || null;
}

// Arrow function with type annotations
const processUsers = (users: User[]): number => {
    return users.reduce((count, user) => {
        if (user.age && user.age > 18) {
            return count + 1;
        }
        return count;
    }, 0);
};

// Mapped and conditional types
type Readonly2<T> = { readonly [K in keyof T]: T[K] };
type Unwrap<T> = T extends Promise<infer U> ? U : T;

enum Role { Admin = "admin", Member = "member" }

namespace Users.Internal {
    export const limit = 1_000;
}

// Export statements
export { User, UserService, UserPreferences };
export type { UserID, UserMap };
export default UserService;
"#;

// Plain ECMAScript with the cover grammars the parser backtracks over.
const JAVASCRIPT_SOURCE: &str = r#"
const cache = new Map();
const memo = (fn) => (...args) => {
    const key = JSON.stringify(args);
    if (!cache.has(key)) cache.set(key, fn(...args));
    return cache.get(key);
};

function* range(start = 0, end = Infinity, step = 1) {
    for (let i = start; i < end; i += step) yield i;
}

async function load({ url, retries = 3 }, [first, ...rest] = []) {
    for (let attempt = 0; attempt < retries; attempt++) {
        try {
            const response = await fetch(url);
            return response?.body ?? first;
        } catch {
            continue;
        }
    }
    return rest;
}

class Counter {
    #count = 0;
    static instances = 0;
    increment() { return ++this.#count; }
    get value() { return this.#count; }
}

let [a, b] = [1, 2];
[a, b] = [b, a];
const label = `${a} and ${b}: ${a ** 2}`;
outer: for (const x of range(0, 10)) {
    for (const y of range(0, x)) {
        if (x * y > 20) break outer;
    }
}
"#;

fn bench_parse(c: &mut Criterion) {
    let typescript = SourceText::new(SourceId::new(0), "bench.ts", TYPESCRIPT_SOURCE);
    c.bench_function("parse_typescript_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let unit = parse(&arena, black_box(&typescript), ParserOptions::default());
            black_box(unit.map(|unit| unit.statements.len()))
        });
    });

    let javascript = SourceText::new(SourceId::new(1), "bench.js", JAVASCRIPT_SOURCE);
    let options = ParserOptions::default().with_dialect(Dialect::EsNext);
    c.bench_function("parse_javascript_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let unit = parse(&arena, black_box(&javascript), options.clone());
            black_box(unit.map(|unit| unit.statements.len()))
        });
    });
}

fn bench_scan(c: &mut Criterion) {
    c.bench_function("scan_typescript_medium", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(black_box(TYPESCRIPT_SOURCE));
            let mut tokens = 0usize;
            while let Ok(token) = scanner.next_token() {
                if token.kind == SyntaxKind::EndOfFileToken {
                    break;
                }
                tokens += 1;
            }
            black_box(tokens)
        });
    });
}

criterion_group!(benches, bench_parse, bench_scan);
criterion_main!(benches);
